use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// App finished starting up; triggers the initial registry load.
    Started,
    /// User asked for the document list to be reloaded.
    RefreshRequested,
    /// Service returned the full document list.
    DocumentsLoaded {
        reason: crate::RefreshReason,
        documents: Vec<crate::Document>,
    },
    /// Listing documents failed for any reason.
    DocumentsFailed { reason: crate::RefreshReason },
    /// User picked a document (or cleared the selection).
    DocumentSelected(Option<crate::DocumentId>),
    /// User picked a file to upload; `None` when the picker returned nothing.
    FileChosen(Option<crate::ChosenFile>),
    /// Service accepted the upload and assigned an id.
    UploadSucceeded { document_id: crate::DocumentId },
    /// Upload failed for any reason.
    UploadFailed,
    /// User edited the question input.
    DraftChanged(String),
    /// User submitted the current draft as a question.
    QuestionSubmitted { at: DateTime<Utc> },
    /// Service answered the in-flight question.
    AnswerReceived {
        answer: String,
        sources: Vec<crate::Source>,
        at: DateTime<Utc>,
    },
    /// Asking failed for any reason.
    AskFailed,
    /// User dismissed the error banner.
    ErrorDismissed,
}
