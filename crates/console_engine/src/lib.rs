//! Demo console engine: backend IO and progress-simulated request execution.
mod backend;
mod engine;
mod progress;
mod types;

pub use backend::{Backend, BackendSettings, ReqwestBackend, UploadFile};
pub use engine::EngineHandle;
pub use progress::{run_with_progress, ChannelProgressSink, ProgressSink};
pub use types::{
    Answer, EngineEvent, FailureKind, OcrPage, RequestError, RequestId, Source, TickerSpec,
};
