use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_logging::{chat_info, chat_warn};

use crate::client::{DocumentService, ReqwestDocumentService, ServiceSettings};
use crate::{DocumentId, FailureKind, RequestId, ServiceError, ServiceEvent};

enum ServiceCommand {
    ListDocuments {
        request_id: RequestId,
    },
    Upload {
        request_id: RequestId,
        file_name: String,
        path: PathBuf,
    },
    Ask {
        request_id: RequestId,
        document_id: DocumentId,
        question: String,
    },
}

/// Runs Document Service requests on a background tokio runtime.
///
/// Every command issues exactly one request; its outcome comes back as a
/// single [`ServiceEvent`] carrying the caller's request id. Requests run to
/// completion and are never retried.
pub struct ServiceHandle {
    cmd_tx: mpsc::Sender<ServiceCommand>,
    event_rx: mpsc::Receiver<ServiceEvent>,
}

impl ServiceHandle {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ServiceError> {
        let service = ReqwestDocumentService::new(settings)?;
        chat_info!("Document Service at {}", service.base_url());
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn DocumentService>) -> Result<Self, ServiceError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(service.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn list_documents(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(ServiceCommand::ListDocuments { request_id });
    }

    pub fn upload(&self, request_id: RequestId, file_name: impl Into<String>, path: PathBuf) {
        let _ = self.cmd_tx.send(ServiceCommand::Upload {
            request_id,
            file_name: file_name.into(),
            path,
        });
    }

    pub fn ask(&self, request_id: RequestId, document_id: DocumentId, question: impl Into<String>) {
        let _ = self.cmd_tx.send(ServiceCommand::Ask {
            request_id,
            document_id,
            question: question.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ServiceEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ServiceEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(service: &dyn DocumentService, command: ServiceCommand) -> ServiceEvent {
    match command {
        ServiceCommand::ListDocuments { request_id } => {
            let result = service.list_documents().await;
            if let Err(err) = &result {
                chat_warn!("Listing documents failed (request {}): {}", request_id, err);
            }
            ServiceEvent::DocumentsListed { request_id, result }
        }
        ServiceCommand::Upload {
            request_id,
            file_name,
            path,
        } => {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => service.upload(&file_name, bytes).await,
                Err(err) => Err(ServiceError::new(
                    FailureKind::Io,
                    format!("{}: {err}", path.display()),
                )),
            };
            if let Err(err) = &result {
                chat_warn!("Uploading {} failed (request {}): {}", file_name, request_id, err);
            }
            ServiceEvent::Uploaded { request_id, result }
        }
        ServiceCommand::Ask {
            request_id,
            document_id,
            question,
        } => {
            let result = service.ask(&document_id, &question).await;
            if let Err(err) = &result {
                chat_warn!(
                    "Asking about document {} failed (request {}): {}",
                    document_id,
                    request_id,
                    err
                );
            }
            ServiceEvent::Answered { request_id, result }
        }
    }
}
