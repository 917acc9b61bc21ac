use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Document identifier as it appears on the wire: a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Number(n) => write!(f, "{n}"),
            DocumentId::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of `GET /documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub filename: String,
    #[serde(default)]
    pub upload_date: Option<String>,
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub document_id: DocumentId,
    #[serde(default)]
    pub message: Option<String>,
    /// Server-side stored name; may differ from the uploaded name.
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub page: i64,
    pub content: String,
}

/// Body of a successful `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<SourceRecord>>,
}

impl AnswerPayload {
    pub fn into_parts(self) -> (String, Vec<SourceRecord>) {
        (self.answer, self.sources.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub document_id: &'a DocumentId,
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    DocumentsListed {
        request_id: RequestId,
        result: Result<Vec<DocumentRecord>, ServiceError>,
    },
    Uploaded {
        request_id: RequestId,
        result: Result<UploadReceipt, ServiceError>,
    },
    Answered {
        request_id: RequestId,
        result: Result<AnswerPayload, ServiceError>,
    },
}

impl ServiceEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            ServiceEvent::DocumentsListed { request_id, .. }
            | ServiceEvent::Uploaded { request_id, .. }
            | ServiceEvent::Answered { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
