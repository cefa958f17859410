use std::time::Duration;

use console_logging::{console_debug, console_info};

use crate::chat::{ChatPanel, CHAT_STAGES};
use crate::progress::{StageProgress, TickerPlan};
use crate::upload::{
    validate_upload, OcrResultArea, UploadPanel, OCR_INITIAL_LABEL, OCR_STAGES,
};
use crate::view_model::AppViewModel;
use crate::{AnswerResult, Effect, OcrPageResult, SelectedFile};

/// Session-wide, strictly increasing. A panel accepts events only for the id
/// it is currently waiting on.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Ocr,
    Llm,
}

impl PanelKind {
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Ocr => "OCR Demo - Extract Text from PDF",
            PanelKind::Llm => "LLM Demo - Ask Questions",
        }
    }
}

/// Why a request failed, already reduced to a displayable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSettings {
    pub ocr_interval: Duration,
    pub chat_interval: Duration,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            ocr_interval: Duration::from_millis(1500),
            chat_interval: Duration::from_millis(1200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DemoSession {
    active_panel: Option<PanelKind>,
    ocr: UploadPanel,
    chat: ChatPanel,
    settings: TickerSettings,
    last_request_id: RequestId,
    dirty: bool,
}

impl DemoSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TickerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn active_panel(&self) -> Option<PanelKind> {
        self.active_panel
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self.active_panel, &self.ocr, &self.chat)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    fn is_mounted(&self, panel: PanelKind) -> bool {
        self.active_panel == Some(panel)
    }

    pub(crate) fn show_panel(&mut self, panel: PanelKind) -> Vec<Effect> {
        self.active_panel = Some(panel);
        match panel {
            PanelKind::Ocr => {
                self.chat.detach();
                self.ocr = UploadPanel::default();
            }
            PanelKind::Llm => {
                self.ocr.detach();
                self.chat.reset();
            }
        }
        self.dirty = true;
        vec![Effect::ScrollIntoView(panel)]
    }

    pub(crate) fn close_panel(&mut self) -> Vec<Effect> {
        self.ocr.detach();
        self.chat.detach();
        if self.active_panel.take().is_some() {
            self.dirty = true;
        }
        vec![Effect::HideDemo]
    }

    pub(crate) fn submit_upload(&mut self, file: Option<SelectedFile>) -> Vec<Effect> {
        if !self.is_mounted(PanelKind::Ocr) {
            return Vec::new();
        }
        let Some(file) = file else {
            return Vec::new();
        };
        self.ocr.selected = Some(file.clone());
        self.dirty = true;

        if let Err(err) = validate_upload(&file) {
            console_info!("upload of {:?} rejected: {}", file.name, err);
            self.ocr.area = OcrResultArea::Rejected(err);
            return Vec::new();
        }

        let request_id = self.next_request_id();
        self.ocr.area = OcrResultArea::InFlight {
            request_id,
            progress: StageProgress::pending(OCR_STAGES, OCR_INITIAL_LABEL),
        };
        vec![Effect::StartOcr {
            request_id,
            file,
            ticker: TickerPlan {
                stage_count: OCR_STAGES.len(),
                interval: self.settings.ocr_interval,
            },
        }]
    }

    pub(crate) fn set_chat_input(&mut self, text: String) {
        if self.is_mounted(PanelKind::Llm) && self.chat.input != text {
            self.chat.input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn press_enter(&mut self, shift: bool) -> Vec<Effect> {
        if !self.is_mounted(PanelKind::Llm) {
            return Vec::new();
        }
        if shift {
            self.chat.input.push('\n');
            self.dirty = true;
            return Vec::new();
        }
        self.ask()
    }

    pub(crate) fn ask(&mut self) -> Vec<Effect> {
        if !self.is_mounted(PanelKind::Llm) {
            return Vec::new();
        }
        let question = self.chat.input.trim().to_string();
        if question.is_empty() {
            return Vec::new();
        }
        self.chat.input.clear();

        // Last request wins: an unanswered question loses its loading message.
        if let Some(superseded) = self.chat.detach() {
            console_debug!("request {} superseded by a new question", superseded);
        }

        let request_id = self.next_request_id();
        self.chat.push_question(question.clone());
        self.chat.push_loading(request_id);
        self.dirty = true;
        vec![
            Effect::ScrollChatToBottom,
            Effect::StartChat {
                request_id,
                question,
                ticker: TickerPlan {
                    stage_count: CHAT_STAGES.len(),
                    interval: self.settings.chat_interval,
                },
            },
        ]
    }

    pub(crate) fn apply_tick(&mut self, request_id: RequestId, stage_index: usize) {
        let progress = match self.active_panel {
            Some(PanelKind::Ocr) => self.ocr.progress_for(request_id),
            Some(PanelKind::Llm) => self.chat.progress_for(request_id),
            None => None,
        };
        match progress {
            Some(progress) => {
                if progress.advance_to(stage_index) {
                    self.dirty = true;
                }
            }
            None => console_debug!("dropping tick {} for stale request {}", stage_index, request_id),
        }
    }

    pub(crate) fn settle_ocr(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<OcrPageResult>, RequestFailure>,
    ) -> Vec<Effect> {
        if !self.is_mounted(PanelKind::Ocr) || !self.ocr.awaits(request_id) {
            console_debug!("dropping OCR result for stale request {}", request_id);
            return Vec::new();
        }
        self.ocr.area = match result {
            Ok(pages) => OcrResultArea::Pages(pages),
            Err(failure) => OcrResultArea::Failed(failure.message),
        };
        self.dirty = true;
        Vec::new()
    }

    pub(crate) fn settle_chat(
        &mut self,
        request_id: RequestId,
        result: Result<AnswerResult, RequestFailure>,
    ) -> Vec<Effect> {
        if !self.is_mounted(PanelKind::Llm) || !self.chat.take_loading(request_id) {
            console_debug!("dropping LLM result for stale request {}", request_id);
            return Vec::new();
        }
        match result {
            Ok(answer) => self.chat.push_answer(answer),
            Err(failure) => self.chat.push_error(failure.message),
        }
        self.dirty = true;
        vec![Effect::ScrollChatToBottom]
    }
}
