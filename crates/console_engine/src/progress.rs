//! Progress-simulated requests: a cosmetic stage ticker raced against the
//! real operation.
//!
//! The ticker runs as its own task and reports through a [`ProgressSink`].
//! When the operation settles the ticker's token is cancelled and the task is
//! joined before the result is handed back, so every tick the sink will ever
//! see has been emitted by the time the caller reports the settlement.

use std::future::Future;
use std::sync::Arc;

use console_logging::{console_trace, console_warn};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, RequestId, TickerSpec};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drives the ticker for `request_id` while awaiting `operation`, and returns
/// the operation's output once the ticker is stopped.
///
/// The ticker emits at most `ticker.stage_count` progress events, one per
/// interval, and then goes quiet; a slow operation simply leaves the last
/// stage showing.
pub async fn run_with_progress<F>(
    request_id: RequestId,
    ticker: TickerSpec,
    sink: Arc<dyn ProgressSink>,
    operation: F,
) -> F::Output
where
    F: Future,
{
    let stop = CancellationToken::new();
    let ticker_task = tokio::spawn(tick_stages(request_id, ticker, sink, stop.clone()));

    let output = operation.await;

    stop.cancel();
    if let Err(err) = ticker_task.await {
        console_warn!("ticker for request {} ended abnormally: {}", request_id, err);
    }
    output
}

async fn tick_stages(
    request_id: RequestId,
    ticker: TickerSpec,
    sink: Arc<dyn ProgressSink>,
    stop: CancellationToken,
) {
    for stage_index in 0..ticker.stage_count {
        tokio::select! {
            biased;
            _ = stop.cancelled() => return,
            _ = tokio::time::sleep(ticker.interval) => {}
        }
        console_trace!("request {} stage {}/{}", request_id, stage_index + 1, ticker.stage_count);
        sink.emit(EngineEvent::Progress {
            request_id,
            stage_index,
        });
    }
}
