use std::sync::{Arc, Mutex};
use std::time::Duration;

use console_engine::{run_with_progress, EngineEvent, ProgressSink, TickerSpec};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    fn stages(&self) -> Vec<usize> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress { stage_index, .. } => Some(*stage_index),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn spec(stage_count: usize) -> TickerSpec {
    TickerSpec {
        stage_count,
        interval: Duration::from_millis(100),
    }
}

async fn settle_and_wait_out_ticker(sink: &RecordingSink) -> Vec<usize> {
    let at_settlement = sink.stages();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(sink.stages(), at_settlement, "tick observed after settlement");
    at_settlement
}

#[tokio::test(start_paused = true)]
async fn immediate_operation_sees_no_ticks() {
    let sink = Arc::new(RecordingSink::default());
    let result = run_with_progress(1, spec(5), sink.clone(), async { Ok::<_, String>(7) }).await;

    assert_eq!(result, Ok(7));
    assert_eq!(settle_and_wait_out_ticker(&sink).await, Vec::<usize>::new());
}

#[tokio::test(start_paused = true)]
async fn ticker_advances_until_operation_settles() {
    let sink = Arc::new(RecordingSink::default());
    let result = run_with_progress(2, spec(5), sink.clone(), async {
        tokio::time::sleep(Duration::from_millis(350)).await;
        Ok::<_, String>("done")
    })
    .await;

    assert_eq!(result, Ok("done"));
    assert_eq!(settle_and_wait_out_ticker(&sink).await, vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn slow_operation_pins_ticker_at_last_stage() {
    let sink = Arc::new(RecordingSink::default());
    let result = run_with_progress(3, spec(4), sink.clone(), async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok::<_, String>(())
    })
    .await;

    assert_eq!(result, Ok(()));
    assert_eq!(settle_and_wait_out_ticker(&sink).await, vec![0, 1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn failure_stops_ticker_and_is_returned() {
    let sink = Arc::new(RecordingSink::default());
    let result = run_with_progress(4, spec(6), sink.clone(), async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        Err::<(), _>("boom".to_string())
    })
    .await;

    assert_eq!(result, Err("boom".to_string()));
    assert_eq!(settle_and_wait_out_ticker(&sink).await, vec![0]);
}

#[tokio::test(start_paused = true)]
async fn ticks_carry_their_request_id() {
    let sink = Arc::new(RecordingSink::default());
    run_with_progress(42, spec(2), sink.clone(), async {
        tokio::time::sleep(Duration::from_millis(250)).await;
    })
    .await;

    let ids: Vec<_> = sink
        .events
        .lock()
        .unwrap()
        .iter()
        .map(|event| match event {
            EngineEvent::Progress { request_id, .. } => *request_id,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(ids, vec![42, 42]);
}

#[tokio::test(start_paused = true)]
async fn zero_stages_never_tick() {
    let sink = Arc::new(RecordingSink::default());
    run_with_progress(5, spec(0), sink.clone(), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
    })
    .await;
    assert!(sink.stages().is_empty());
}
