use std::collections::HashMap;

use chat_logging::{chat_info, chat_warn};
use chrono::{DateTime, Utc};
use pdfchat_core::{Document, DocumentId, Effect, Msg, RefreshReason, Source};
use pdfchat_service::{RequestId, ServiceEvent, ServiceHandle};

/// What an in-flight request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingRequest {
    Refresh(RefreshReason),
    Upload,
    Ask,
}

/// Forwards core effects to the service handle and turns its events back
/// into core messages.
pub struct EffectRunner {
    service: ServiceHandle,
    next_request_id: RequestId,
    pending: HashMap<RequestId, PendingRequest>,
}

impl EffectRunner {
    pub fn new(service: ServiceHandle) -> Self {
        Self {
            service,
            next_request_id: 1,
            pending: HashMap::new(),
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let request_id = self.next_request_id;
            self.next_request_id += 1;
            match effect {
                Effect::FetchDocuments { reason } => {
                    chat_info!("FetchDocuments request_id={} reason={:?}", request_id, reason);
                    self.pending
                        .insert(request_id, PendingRequest::Refresh(reason));
                    self.service.list_documents(request_id);
                }
                Effect::UploadFile { file } => {
                    chat_info!(
                        "UploadFile request_id={} name={} path={:?}",
                        request_id,
                        file.name,
                        file.path
                    );
                    self.pending.insert(request_id, PendingRequest::Upload);
                    self.service.upload(request_id, file.name, file.path);
                }
                Effect::AskQuestion {
                    document_id,
                    question,
                } => {
                    chat_info!(
                        "AskQuestion request_id={} document_id={} question_len={}",
                        request_id,
                        document_id,
                        question.len()
                    );
                    self.pending.insert(request_id, PendingRequest::Ask);
                    self.service
                        .ask(request_id, to_wire_id(document_id), question);
                }
            }
        }
    }

    /// Returns the next completed request as a message, if any.
    pub fn poll(&mut self) -> Option<Msg> {
        while let Some(event) = self.service.try_recv() {
            let Some(pending) = self.pending.remove(&event.request_id()) else {
                chat_warn!("Dropping event for unknown request {}", event.request_id());
                continue;
            };
            if let Some(msg) = translate(pending, event, Utc::now()) {
                return Some(msg);
            }
        }
        None
    }

    /// True when no request is in flight.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

fn translate(pending: PendingRequest, event: ServiceEvent, now: DateTime<Utc>) -> Option<Msg> {
    match (pending, event) {
        (PendingRequest::Refresh(reason), ServiceEvent::DocumentsListed { result, .. }) => {
            Some(match result {
                Ok(records) => Msg::DocumentsLoaded {
                    reason,
                    documents: records
                        .into_iter()
                        .map(|record| Document {
                            id: to_core_id(record.id),
                            filename: record.filename,
                            upload_date: record.upload_date,
                        })
                        .collect(),
                },
                Err(_) => Msg::DocumentsFailed { reason },
            })
        }
        (PendingRequest::Upload, ServiceEvent::Uploaded { result, .. }) => Some(match result {
            Ok(receipt) => Msg::UploadSucceeded {
                document_id: to_core_id(receipt.document_id),
            },
            Err(_) => Msg::UploadFailed,
        }),
        (PendingRequest::Ask, ServiceEvent::Answered { result, .. }) => Some(match result {
            Ok(payload) => {
                let (answer, sources) = payload.into_parts();
                Msg::AnswerReceived {
                    answer,
                    sources: sources
                        .into_iter()
                        .map(|source| Source {
                            page: source.page,
                            content: source.content,
                        })
                        .collect(),
                    at: now,
                }
            }
            Err(_) => Msg::AskFailed,
        }),
        (pending, event) => {
            chat_warn!("Event {:?} does not match request kind {:?}", event, pending);
            None
        }
    }
}

fn to_core_id(id: pdfchat_service::DocumentId) -> DocumentId {
    match id {
        pdfchat_service::DocumentId::Number(n) => DocumentId::Number(n),
        pdfchat_service::DocumentId::Text(s) => DocumentId::Text(s),
    }
}

fn to_wire_id(id: DocumentId) -> pdfchat_service::DocumentId {
    match id {
        DocumentId::Number(n) => pdfchat_service::DocumentId::Number(n),
        DocumentId::Text(s) => pdfchat_service::DocumentId::Text(s),
    }
}
