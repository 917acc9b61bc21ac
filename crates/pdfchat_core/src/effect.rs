use crate::{ChosenFile, DocumentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDocuments { reason: RefreshReason },
    UploadFile { file: ChosenFile },
    AskQuestion {
        document_id: DocumentId,
        question: String,
    },
}

/// Why the registry is being refreshed; echoed back with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    Manual,
    /// Follow-up to a successful upload; the new id is selected once the
    /// refresh resolves.
    AfterUpload(DocumentId),
}
