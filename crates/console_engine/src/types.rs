use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Cosmetic ticker shape for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSpec {
    pub stage_count: usize,
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Ticker reached `stage_index` (0-based).
    Progress {
        request_id: RequestId,
        stage_index: usize,
    },
    OcrCompleted {
        request_id: RequestId,
        result: Result<Vec<OcrPage>, RequestError>,
    },
    ChatCompleted {
        request_id: RequestId,
        result: Result<Answer, RequestError>,
    },
}

/// One element of the `/ocr` response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrPage {
    pub page_number: u32,
    #[serde(rename = "MD_text")]
    pub md_text: String,
}

/// `/llm` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub pdf_name: String,
    pub page_number: u32,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Source>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn from_kind(kind: FailureKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Network,
    MalformedResponse,
    TooLarge { max_bytes: u64, actual: u64 },
    FileRead,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "HTTP error! status: {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual})")
            }
            FailureKind::FileRead => write!(f, "could not read file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_sources_tolerate_missing_and_null() {
        let missing: Answer = serde_json::from_str(r#"{"answer":"a"}"#).unwrap();
        assert!(missing.sources.is_empty());
        let null: Answer = serde_json::from_str(r#"{"answer":"a","sources":null}"#).unwrap();
        assert!(null.sources.is_empty());
    }

    #[test]
    fn answer_ignores_extra_source_fields() {
        let body = r#"{"answer":"a","sources":[{"pdf_name":"d.pdf","page_number":2,"content":"..."}]}"#;
        let answer: Answer = serde_json::from_str(body).unwrap();
        assert_eq!(
            answer.sources,
            vec![Source {
                pdf_name: "d.pdf".to_string(),
                page_number: 2
            }]
        );
    }

    #[test]
    fn http_status_message_names_the_code() {
        assert_eq!(
            RequestError::from_kind(FailureKind::HttpStatus(500)).to_string(),
            "HTTP error! status: 500"
        );
    }
}
