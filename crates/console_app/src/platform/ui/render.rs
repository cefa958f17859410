//! Plain-text frames for the terminal.
//!
//! Backend and user text is printed verbatim, line breaks and indentation
//! included. Only terminal control characters are replaced so that text can
//! never move the cursor or recolor the screen.

use std::fmt::Write;

use console_core::{
    AppViewModel, MessageBody, MessageView, OcrResultView, PanelKind, ProgressView, Role,
    SourceRef, UploadStatus, OCR_PENDING_FACTS,
};

const BAR_WIDTH: usize = 28;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Full terminal frame for the current view.
pub fn render(view: &AppViewModel) -> String {
    let mut frame = String::from(CLEAR_SCREEN);
    match (view.active_panel, view.title) {
        (Some(panel), Some(title)) => {
            let _ = writeln!(frame, "== {title} ==\n");
            match panel {
                PanelKind::Ocr => render_ocr(&mut frame, view),
                PanelKind::Llm => render_chat(&mut frame, view),
            }
        }
        _ => frame.push_str("No demo open. Type :ocr or :llm (:help for commands).\n"),
    }
    frame
}

fn render_ocr(frame: &mut String, view: &AppViewModel) {
    match &view.ocr.selected_file {
        Some(name) => {
            let _ = writeln!(frame, "File: {}", literal(name));
        }
        None => frame.push_str("Choose a PDF with :upload <path>\n"),
    }
    if let Some(status) = view.ocr.status {
        let _ = writeln!(frame, "Status: {}", status_label(status));
    }
    frame.push('\n');
    match &view.ocr.result {
        OcrResultView::Empty => {}
        OcrResultView::Rejected(message) => {
            let _ = writeln!(frame, "{message}");
        }
        OcrResultView::Pending(progress) => {
            let _ = writeln!(frame, "{}", progress_line(progress));
            let _ = writeln!(frame, "{}", OCR_PENDING_FACTS.join(" | "));
        }
        OcrResultView::Pages(pages) => {
            frame.push_str("OCR Completed Successfully!\nExtracted Text by Page:\n");
            for page in pages {
                let _ = write!(frame, "\n--- {} ---\n{}\n", page.label, literal(&page.text));
            }
        }
        OcrResultView::Failed(message) => {
            let _ = writeln!(frame, "Error processing PDF: {}", literal(message));
        }
    }
}

fn render_chat(frame: &mut String, view: &AppViewModel) {
    for message in &view.chat.messages {
        frame.push_str(&message_text(message));
        frame.push_str("\n\n");
    }
    if !view.chat.input.is_empty() {
        let _ = writeln!(frame, "> {}", literal(&view.chat.input).replace('\n', "\n> "));
    }
}

fn message_text(message: &MessageView) -> String {
    let speaker = match message.role {
        Role::User => "You",
        Role::Bot => "Assistant",
    };
    let body = match &message.body {
        MessageBody::Notice(text) => (*text).to_string(),
        MessageBody::Text(text) => literal(text),
        MessageBody::Answer { text, citations } => answer_text(text, citations),
        MessageBody::Error(text) => format!("Error: {}", literal(text)),
        MessageBody::Loading(progress) => progress_line(progress),
    };
    format!("{speaker}: {}", body.trim_end())
}

fn answer_text(text: &str, citations: &[SourceRef]) -> String {
    let mut body = literal(text);
    if !citations.is_empty() {
        body.push_str("\nSources:");
        for source in citations {
            let _ = write!(body, "\n  - {}", literal(&source.citation()));
        }
    }
    body
}

fn status_label(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::InFlight => "processing",
        UploadStatus::Succeeded => "done",
        UploadStatus::Failed => "failed",
    }
}

fn progress_line(progress: &ProgressView) -> String {
    let filled = BAR_WIDTH * usize::from(progress.percent) / 100;
    format!(
        "{}\n[{}{}] {:>3}% ({}/{})",
        progress.label,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.percent,
        progress.stages_shown,
        progress.stage_count
    )
}

/// Text as the user should read it; control characters other than line
/// breaks and tabs become U+FFFD.
fn literal(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() && c != '\n' && c != '\t' {
                char::REPLACEMENT_CHARACTER
            } else {
                c
            }
        })
        .collect()
}
