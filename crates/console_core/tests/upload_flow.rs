use std::sync::Once;
use std::time::Duration;

use console_core::{
    markup, update, DemoSession, Effect, Msg, OcrPageResult, OcrResultView, PanelKind,
    ProgressView, RequestFailure, SelectedFile, TickerPlan, TickerSettings, UploadStatus,
    MAX_UPLOAD_BYTES,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

fn ocr_session() -> DemoSession {
    let (state, _) = update(DemoSession::new(), Msg::ShowPanel(PanelKind::Ocr));
    state
}

fn pick(state: DemoSession, name: &str, size: u64) -> (DemoSession, Vec<Effect>) {
    update(
        state,
        Msg::FileSelected(Some(SelectedFile::new(name, size, format!("/docs/{name}")))),
    )
}

#[test]
fn valid_pdf_starts_request_with_pending_view() {
    init_logging();
    let (state, effects) = pick(ocr_session(), "report.pdf", 2 * 1024 * 1024);

    assert_eq!(
        effects,
        vec![Effect::StartOcr {
            request_id: 1,
            file: SelectedFile::new("report.pdf", 2 * 1024 * 1024, "/docs/report.pdf"),
            ticker: TickerPlan {
                stage_count: 7,
                interval: Duration::from_millis(1500),
            },
        }]
    );
    let view = state.view();
    assert_eq!(view.ocr.status, Some(UploadStatus::InFlight));
    assert_eq!(view.ocr.selected_file.as_deref(), Some("report.pdf"));
    assert_eq!(
        view.ocr.result,
        OcrResultView::Pending(ProgressView {
            label: "Preparing PDF for processing...",
            stages_shown: 0,
            stage_count: 7,
            percent: 0,
        })
    );
}

#[test]
fn ticker_interval_follows_settings() {
    init_logging();
    let settings = TickerSettings {
        ocr_interval: Duration::from_millis(20),
        chat_interval: Duration::from_millis(10),
    };
    let (state, _) = update(
        DemoSession::with_settings(settings),
        Msg::ShowPanel(PanelKind::Ocr),
    );
    let (_, effects) = pick(state, "a.pdf", 1);
    assert!(matches!(
        effects.as_slice(),
        [Effect::StartOcr { ticker: TickerPlan { interval, .. }, .. }] if *interval == Duration::from_millis(20)
    ));
}

#[test]
fn non_pdf_is_rejected_without_request() {
    init_logging();
    let (state, effects) = pick(ocr_session(), "image.png", 100);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.ocr.status, Some(UploadStatus::Failed));
    assert_eq!(
        markup::ocr_result(&view.ocr.result),
        "<div class=\"error\">Please upload a PDF file.</div>"
    );
}

#[test]
fn oversized_pdf_is_rejected_without_request() {
    init_logging();
    let (state, effects) = pick(ocr_session(), "big.pdf", MAX_UPLOAD_BYTES + 1);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().ocr.result,
        OcrResultView::Rejected("File size must be less than 10MB.".to_string())
    );

    let (_, effects) = pick(ocr_session(), "edge.PDF", MAX_UPLOAD_BYTES);
    assert_eq!(effects.len(), 1);
}

#[test]
fn dismissed_picker_is_noop() {
    init_logging();
    let state = ocr_session();
    let (next, effects) = update(state.clone(), Msg::FileSelected(None));
    assert!(effects.is_empty());
    assert_eq!(state, next);
}

#[test]
fn successful_ocr_renders_one_block_per_page() {
    init_logging();
    let (state, _) = pick(ocr_session(), "report.pdf", 2 * 1024 * 1024);
    let (state, effects) = update(
        state,
        Msg::OcrSettled {
            request_id: 1,
            result: Ok(vec![OcrPageResult {
                page_number: 1,
                extracted_text: "Hello".to_string(),
            }]),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.ocr.status, Some(UploadStatus::Succeeded));
    let OcrResultView::Pages(pages) = &view.ocr.result else {
        panic!("expected pages, got {:?}", view.ocr.result);
    };
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].label, "Page 1");
    assert_eq!(pages[0].text, "Hello");

    let html = markup::ocr_result(&view.ocr.result);
    assert!(html.contains("OCR Completed Successfully!"));
    assert!(html.contains("<h5>Page 1</h5>"));
    assert!(html.contains(">Hello</div>"));
}

#[test]
fn pages_keep_backend_order_and_whitespace() {
    init_logging();
    let (state, _) = pick(ocr_session(), "report.pdf", 10);
    let pages = vec![
        OcrPageResult {
            page_number: 1,
            extracted_text: "first\n  indented".to_string(),
        },
        OcrPageResult {
            page_number: 2,
            extracted_text: "<second>".to_string(),
        },
    ];
    let (state, _) = update(
        state,
        Msg::OcrSettled {
            request_id: 1,
            result: Ok(pages),
        },
    );
    let html = markup::ocr_result(&state.view().ocr.result);
    let first = html.find("Page 1").unwrap();
    let second = html.find("Page 2").unwrap();
    assert!(first < second);
    assert!(html.contains("first\n  indented"));
    assert!(html.contains("&lt;second&gt;"));
    assert!(html.contains("white-space: pre-wrap"));
}

#[test]
fn failed_ocr_renders_single_escaped_error() {
    init_logging();
    let (state, _) = pick(ocr_session(), "report.pdf", 10);
    let (state, _) = update(
        state,
        Msg::OcrSettled {
            request_id: 1,
            result: Err(RequestFailure::new("HTTP error! status: 502 <proxy>")),
        },
    );
    let view = state.view();
    assert_eq!(view.ocr.status, Some(UploadStatus::Failed));
    assert_eq!(
        markup::ocr_result(&view.ocr.result),
        "<div class=\"error\">Error processing PDF: HTTP error! status: 502 &lt;proxy&gt;</div>"
    );
}

#[test]
fn failure_does_not_block_next_upload() {
    init_logging();
    let (state, _) = pick(ocr_session(), "report.pdf", 10);
    let (state, _) = update(
        state,
        Msg::OcrSettled {
            request_id: 1,
            result: Err(RequestFailure::new("network error")),
        },
    );
    let (state, effects) = pick(state, "report.pdf", 10);
    assert!(matches!(
        effects.as_slice(),
        [Effect::StartOcr { request_id: 2, .. }]
    ));
    assert_eq!(state.view().ocr.status, Some(UploadStatus::InFlight));
}
