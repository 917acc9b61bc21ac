use crate::view_model::{AppViewModel, DocumentRowView};
use crate::{Document, DocumentId, Message};

/// Where the upload pipeline currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    /// File is being sent to the service.
    Sending,
    /// Upload accepted; waiting for the follow-up registry refresh before
    /// selecting the new document.
    Refreshing(DocumentId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    documents: Vec<Document>,
    selected_document: Option<DocumentId>,
    messages: Vec<Message>,
    draft: String,
    upload: UploadPhase,
    pending_ask: bool,
    last_error: Option<String>,
    /// Bumped on every `set_error`, so a repeated identical error is still
    /// distinguishable from the one already shown.
    error_seq: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let documents = self
            .documents
            .iter()
            .map(|doc| DocumentRowView {
                id: doc.id.clone(),
                filename: doc.filename.clone(),
                upload_date: doc.upload_date.clone(),
                selected: self.selected_document.as_ref() == Some(&doc.id),
            })
            .collect();
        let selected_filename = self.selected_document.as_ref().and_then(|id| {
            self.documents
                .iter()
                .find(|doc| &doc.id == id)
                .map(|doc| doc.filename.clone())
        });

        AppViewModel {
            documents,
            selected_document: self.selected_document.clone(),
            selected_filename,
            messages: self.messages.clone(),
            draft: self.draft.clone(),
            pending_upload: self.pending_upload(),
            pending_ask: self.pending_ask,
            can_upload: !self.pending_upload(),
            can_ask: self.selected_document.is_some() && !self.pending_ask,
            error: self.last_error.clone(),
            error_seq: self.error_seq,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn selected_document(&self) -> Option<&DocumentId> {
        self.selected_document.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn upload_phase(&self) -> &UploadPhase {
        &self.upload
    }

    pub fn pending_upload(&self) -> bool {
        self.upload != UploadPhase::Idle
    }

    pub fn pending_ask(&self) -> bool {
        self.pending_ask
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_documents(&mut self, documents: Vec<Document>) {
        self.documents = documents;
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, id: Option<DocumentId>) {
        if self.selected_document != id {
            self.selected_document = id;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_draft(&mut self, draft: String) {
        if self.draft != draft {
            self.draft = draft;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_draft(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.draft)
    }

    pub(crate) fn set_upload_phase(&mut self, phase: UploadPhase) {
        self.upload = phase;
        self.mark_dirty();
    }

    pub(crate) fn set_pending_ask(&mut self, pending: bool) {
        self.pending_ask = pending;
        self.mark_dirty();
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
        self.error_seq += 1;
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.mark_dirty();
        }
    }
}
