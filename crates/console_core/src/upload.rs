use std::fmt;
use std::path::PathBuf;

use crate::progress::StageProgress;
use crate::RequestId;

/// Largest upload accepted before any request is made (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub(crate) const OCR_INITIAL_LABEL: &str = "Preparing PDF for processing...";

pub(crate) const OCR_STAGES: &[&str] = &[
    "📄 Converting PDF to images...",
    "🔍 Analyzing document layout...",
    "🤖 Running Vision-Language Model...",
    "📝 Extracting text with 88.3% accuracy...",
    "🔤 Preserving Cyrillic and Latin characters...",
    "🖼️ Detecting embedded images...",
    "✨ Finalizing OCR results...",
];

/// Static facts shown next to the OCR progress bar.
pub const OCR_PENDING_FACTS: &[&str] = &[
    "Model: Llama-4-Maverick-17B",
    "Accuracy: 88.3% CSR",
    "Languages: AZ, RU, EN",
];

/// A file picked for OCR. Only metadata is held here; the engine reads the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NotPdf,
    TooLarge { size: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotPdf => write!(f, "Please upload a PDF file."),
            ValidationError::TooLarge { .. } => write!(f, "File size must be less than 10MB."),
        }
    }
}

/// Client-side gate in front of `/ocr`.
pub fn validate_upload(file: &SelectedFile) -> Result<(), ValidationError> {
    if !file.name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ValidationError::NotPdf);
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size: file.size });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrPageResult {
    pub page_number: u32,
    pub extracted_text: String,
}

/// Lifecycle of the single OCR attempt the panel currently shows.
/// Validation is synchronous, so an attempt is never observed mid-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum OcrResultArea {
    #[default]
    Empty,
    Rejected(ValidationError),
    InFlight {
        request_id: RequestId,
        progress: StageProgress,
    },
    Pages(Vec<OcrPageResult>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadPanel {
    pub(crate) selected: Option<SelectedFile>,
    pub(crate) area: OcrResultArea,
}

impl UploadPanel {
    pub(crate) fn status(&self) -> Option<UploadStatus> {
        match self.area {
            OcrResultArea::Empty => None,
            OcrResultArea::Rejected(_) => Some(UploadStatus::Failed),
            OcrResultArea::InFlight { .. } => Some(UploadStatus::InFlight),
            OcrResultArea::Pages(_) => Some(UploadStatus::Succeeded),
            OcrResultArea::Failed(_) => Some(UploadStatus::Failed),
        }
    }

    /// Progress of `request_id` if it is the request this panel still waits on.
    pub(crate) fn progress_for(&mut self, request_id: RequestId) -> Option<&mut StageProgress> {
        match &mut self.area {
            OcrResultArea::InFlight {
                request_id: active,
                progress,
            } if *active == request_id => Some(progress),
            _ => None,
        }
    }

    pub(crate) fn awaits(&self, request_id: RequestId) -> bool {
        matches!(self.area, OcrResultArea::InFlight { request_id: active, .. } if active == request_id)
    }

    /// Forgets any in-flight request so its late events are dropped.
    pub(crate) fn detach(&mut self) {
        if matches!(self.area, OcrResultArea::InFlight { .. }) {
            self.area = OcrResultArea::Empty;
        }
    }
}
