//! PdfChat service: Document Service client and background request execution.
mod client;
mod handle;
mod types;

pub use client::{DocumentService, ReqwestDocumentService, ServiceSettings};
pub use handle::ServiceHandle;
pub use types::{
    AnswerPayload, DocumentId, DocumentRecord, FailureKind, RequestId, ServiceError,
    ServiceEvent, SourceRecord, UploadReceipt,
};
