use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use console_logging::{console_info, console_warn, with_request_scope};

use crate::progress::{run_with_progress, ChannelProgressSink, ProgressSink};
use crate::{Backend, EngineEvent, RequestError, RequestId, TickerSpec, UploadFile};

enum EngineCommand {
    Ocr {
        request_id: RequestId,
        path: PathBuf,
        file_name: String,
        ticker: TickerSpec,
    },
    Chat {
        request_id: RequestId,
        question: String,
        ticker: TickerSpec,
    },
}

/// Owns a background tokio runtime that runs progress-simulated requests.
///
/// Commands go in through [`EngineHandle::run_ocr`] / [`EngineHandle::run_chat`];
/// progress and completion events come back in order per request through
/// [`EngineHandle::try_recv`]. In-flight requests are never cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn run_ocr(
        &self,
        request_id: RequestId,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        ticker: TickerSpec,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Ocr {
            request_id,
            path: path.into(),
            file_name: file_name.into(),
            ticker,
        });
    }

    pub fn run_chat(&self, request_id: RequestId, question: impl Into<String>, ticker: TickerSpec) {
        let _ = self.cmd_tx.send(EngineCommand::Chat {
            request_id,
            question: question.into(),
            ticker,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx.clone()));
    match command {
        EngineCommand::Ocr {
            request_id,
            path,
            file_name,
            ticker,
        } => {
            with_request_scope(request_id, || {
                console_info!("POST /ocr file={} stages={}", file_name, ticker.stage_count)
            });
            let result = run_with_progress(request_id, ticker, sink, async {
                let upload = UploadFile::read(&path, file_name).await?;
                backend.extract_text(upload).await
            })
            .await;
            log_outcome(request_id, "/ocr", result.as_ref().map(|pages| pages.len()));
            let _ = event_tx.send(EngineEvent::OcrCompleted { request_id, result });
        }
        EngineCommand::Chat {
            request_id,
            question,
            ticker,
        } => {
            with_request_scope(request_id, || {
                console_info!("POST /llm question_len={}", question.len())
            });
            let result =
                run_with_progress(request_id, ticker, sink, backend.ask(&question)).await;
            log_outcome(
                request_id,
                "/llm",
                result.as_ref().map(|answer| answer.sources.len()),
            );
            let _ = event_tx.send(EngineEvent::ChatCompleted { request_id, result });
        }
    }
}

fn log_outcome(request_id: RequestId, endpoint: &str, outcome: Result<usize, &RequestError>) {
    with_request_scope(request_id, || match outcome {
        Ok(count) => console_info!("{} settled ok ({} items)", endpoint, count),
        Err(err) => console_warn!("{} failed: {:?}: {}", endpoint, err.kind, err.message),
    });
}
