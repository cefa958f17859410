use crate::chat::{ChatMessage, ChatPanel, MessageContent, CHAT_GREETING};
use crate::progress::StageProgress;
use crate::upload::{OcrResultArea, UploadPanel};
use crate::{OcrPageResult, PanelKind, Role, SourceRef, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub active_panel: Option<PanelKind>,
    pub title: Option<&'static str>,
    pub ocr: OcrPanelView,
    pub chat: ChatPanelView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OcrPanelView {
    pub selected_file: Option<String>,
    pub status: Option<UploadStatus>,
    pub result: OcrResultView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OcrResultView {
    #[default]
    Empty,
    /// Validation message; a trusted constant.
    Rejected(String),
    Pending(ProgressView),
    Pages(Vec<PageView>),
    /// Raw failure message from the backend or transport.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub label: &'static str,
    pub stages_shown: usize,
    pub stage_count: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatPanelView {
    pub messages: Vec<MessageView>,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Trusted text: greeting constant.
    Notice(&'static str),
    /// User question, untrusted.
    Text(String),
    Answer {
        text: String,
        citations: Vec<SourceRef>,
    },
    Error(String),
    Loading(ProgressView),
}

impl AppViewModel {
    pub(crate) fn build(
        active_panel: Option<PanelKind>,
        ocr: &UploadPanel,
        chat: &ChatPanel,
    ) -> Self {
        Self {
            active_panel,
            title: active_panel.map(PanelKind::title),
            ocr: OcrPanelView {
                selected_file: ocr.selected.as_ref().map(|file| file.name.clone()),
                status: ocr.status(),
                result: ocr_result_view(&ocr.area),
            },
            chat: ChatPanelView {
                messages: chat.transcript.iter().map(message_view).collect(),
                input: chat.input.clone(),
            },
        }
    }
}

impl ProgressView {
    fn from_progress(progress: &StageProgress) -> Self {
        Self {
            label: progress.label(),
            stages_shown: progress.stages_shown(),
            stage_count: progress.stage_count(),
            percent: progress.percent(),
        }
    }
}

fn ocr_result_view(area: &OcrResultArea) -> OcrResultView {
    match area {
        OcrResultArea::Empty => OcrResultView::Empty,
        OcrResultArea::Rejected(err) => OcrResultView::Rejected(err.to_string()),
        OcrResultArea::InFlight { progress, .. } => {
            OcrResultView::Pending(ProgressView::from_progress(progress))
        }
        OcrResultArea::Pages(pages) => OcrResultView::Pages(pages.iter().map(page_view).collect()),
        OcrResultArea::Failed(message) => OcrResultView::Failed(message.clone()),
    }
}

fn page_view(page: &OcrPageResult) -> PageView {
    PageView {
        label: format!("Page {}", page.page_number),
        text: page.extracted_text.clone(),
    }
}

fn message_view(message: &ChatMessage) -> MessageView {
    let body = match &message.content {
        MessageContent::Greeting => MessageBody::Notice(CHAT_GREETING),
        MessageContent::Question(text) => MessageBody::Text(text.clone()),
        MessageContent::Answer(answer) => MessageBody::Answer {
            text: answer.answer_text.clone(),
            citations: answer.sources.clone(),
        },
        MessageContent::Error(message) => MessageBody::Error(message.clone()),
        MessageContent::Loading { progress, .. } => {
            MessageBody::Loading(ProgressView::from_progress(progress))
        }
    };
    MessageView {
        role: message.role,
        body,
    }
}
