use crate::{DocumentId, Message};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub documents: Vec<DocumentRowView>,
    pub selected_document: Option<DocumentId>,
    /// Filename of the selection when it is present in the cached registry.
    pub selected_filename: Option<String>,
    pub messages: Vec<Message>,
    pub draft: String,
    pub pending_upload: bool,
    pub pending_ask: bool,
    pub can_upload: bool,
    pub can_ask: bool,
    pub error: Option<String>,
    /// Changes each time an error is raised, even when the text repeats.
    pub error_seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRowView {
    pub id: DocumentId,
    pub filename: String,
    pub upload_date: Option<String>,
    pub selected: bool,
}
