use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use serde::Serialize;
use url::Url;

use crate::{Answer, FailureKind, OcrPage, RequestError};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Origin serving `/ocr` and `/llm`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

/// A PDF read into memory, ready to be sent as the `file` form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn read(path: &Path, name: impl Into<String>) -> Result<Self, RequestError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            RequestError::new(
                FailureKind::FileRead,
                format!("could not read {}: {err}", path.display()),
            )
        })?;
        Ok(Self {
            name: name.into(),
            bytes,
        })
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `POST /ocr` with the file as multipart form data.
    async fn extract_text(&self, upload: UploadFile) -> Result<Vec<OcrPage>, RequestError>;

    /// `POST /llm` with `{"question": ...}`.
    async fn ask(&self, question: &str) -> Result<Answer, RequestError>;
}

#[derive(Serialize)]
struct QuestionBody<'a> {
    question: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// No overall request timeout is set: a hung backend keeps the ticker
    /// pinned rather than being reported as a failure.
    pub fn new(settings: BackendSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        Url::parse(&self.settings.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| {
                RequestError::new(
                    FailureKind::InvalidEndpoint,
                    format!("{}: {err}", self.settings.base_url),
                )
            })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, RequestError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::from_kind(FailureKind::HttpStatus(
                status.as_u16(),
            )));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(len) = response.content_length() {
            if len > max_bytes {
                return Err(RequestError::from_kind(FailureKind::TooLarge {
                    max_bytes,
                    actual: len,
                }));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RequestError::from_kind(FailureKind::TooLarge {
                    max_bytes,
                    actual: next_len,
                }));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn extract_text(&self, upload: UploadFile) -> Result<Vec<OcrPage>, RequestError> {
        let url = self.endpoint("/ocr")?;
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.name)
            .mime_str("application/pdf")
            .map_err(map_reqwest_error)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;

        let pages: Vec<OcrPage> = parse_json(&body)?;
        if let Some(page) = pages.iter().find(|page| page.page_number == 0) {
            return Err(RequestError::new(
                FailureKind::MalformedResponse,
                format!("page numbers start at 1, got {}", page.page_number),
            ));
        }
        Ok(pages)
    }

    async fn ask(&self, question: &str) -> Result<Answer, RequestError> {
        let url = self.endpoint("/llm")?;
        let response = self
            .client
            .post(url)
            .json(&QuestionBody { question })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;
        parse_json(&body)
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, RequestError> {
    serde_json::from_slice(body).map_err(|err| {
        RequestError::new(
            FailureKind::MalformedResponse,
            format!("malformed response: {err}"),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    RequestError::new(FailureKind::Network, format!("network error: {err}"))
}
