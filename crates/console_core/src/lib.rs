//! Demo console core: pure session state machine, view model and markup.
mod chat;
mod effect;
mod escape;
pub mod markup;
mod msg;
mod progress;
mod state;
mod update;
mod upload;
mod view_model;

pub use chat::{AnswerResult, Role, SourceRef};
pub use effect::Effect;
pub use escape::escape;
pub use msg::Msg;
pub use progress::{StageProgress, TickerPlan};
pub use state::{DemoSession, PanelKind, RequestFailure, RequestId, TickerSettings};
pub use update::update;
pub use upload::{
    validate_upload, OcrPageResult, SelectedFile, UploadStatus, ValidationError, MAX_UPLOAD_BYTES,
    OCR_PENDING_FACTS,
};
pub use view_model::{
    AppViewModel, ChatPanelView, MessageBody, MessageView, OcrPanelView, OcrResultView, PageView,
    ProgressView,
};
