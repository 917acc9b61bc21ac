use std::time::Duration;

use chat_logging::chat_debug;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::types::AskRequest;
use crate::{AnswerPayload, DocumentId, DocumentRecord, FailureKind, ServiceError, UploadReceipt};

const DOCUMENTS_PATH: &str = "documents";
const UPLOAD_PATH: &str = "upload";
const ASK_PATH: &str = "ask";
const UPLOAD_FIELD: &str = "file";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub base_url: String,
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait DocumentService: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, ServiceError>;

    async fn upload(&self, file_name: &str, bytes: Vec<u8>)
        -> Result<UploadReceipt, ServiceError>;

    async fn ask(
        &self,
        document_id: &DocumentId,
        question: &str,
    ) -> Result<AnswerPayload, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDocumentService {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestDocumentService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ServiceError> {
        let base = parse_base_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base
            .join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl DocumentService for ReqwestDocumentService {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, ServiceError> {
        let url = self.endpoint(DOCUMENTS_PATH)?;
        chat_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, ServiceError> {
        let url = self.endpoint(UPLOAD_PATH)?;
        chat_debug!("POST {} ({} bytes)", url, bytes.len());
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn ask(
        &self,
        document_id: &DocumentId,
        question: &str,
    ) -> Result<AnswerPayload, ServiceError> {
        let url = self.endpoint(ASK_PATH)?;
        chat_debug!("POST {} document_id={}", url, document_id);
        let response = self
            .client
            .post(url)
            .json(&AskRequest {
                document_id,
                question,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }
}

/// Accepts only absolute http(s) URLs. The path is normalised to end in `/`
/// so endpoints resolve underneath it rather than replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ServiceError::new(
            FailureKind::InvalidUrl,
            format!("unsupported base url {raw}"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    response.json::<T>().await.map_err(map_reqwest_error)
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::Decode, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
