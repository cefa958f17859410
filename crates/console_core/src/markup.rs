//! Markup fragments for the result area and transcript.
//!
//! Every string that came from outside the process goes through [`escape`];
//! labels, stage names and other constants are inserted as they are.

use std::fmt::Write;

use crate::upload::OCR_PENDING_FACTS;
use crate::view_model::{
    ChatPanelView, MessageBody, MessageView, OcrResultView, ProgressView,
};
use crate::{escape, Role};

pub fn ocr_result(view: &OcrResultView) -> String {
    match view {
        OcrResultView::Empty => String::new(),
        OcrResultView::Rejected(message) => error_line(message),
        OcrResultView::Pending(progress) => {
            let mut html = String::from("<div class=\"loading-animated\">");
            html.push_str(&progress_fragment(progress));
            html.push_str("<div class=\"ocr-stats\">");
            for fact in OCR_PENDING_FACTS {
                let _ = write!(html, "<span class=\"stat-label\">{fact}</span>");
            }
            html.push_str("</div></div>");
            html
        }
        OcrResultView::Pages(pages) => {
            let mut html = String::from(
                "<div class=\"success\">OCR Completed Successfully!</div><h4>Extracted Text by Page:</h4>",
            );
            for page in pages {
                let _ = write!(
                    html,
                    "<div class=\"ocr-page\"><h5>{}</h5><div class=\"ocr-text\" style=\"white-space: pre-wrap\">{}</div></div>",
                    page.label,
                    escape(&page.text)
                );
            }
            html
        }
        OcrResultView::Failed(message) => {
            error_line(&format!("Error processing PDF: {}", escape(message)))
        }
    }
}

pub fn chat_message(message: &MessageView) -> String {
    let class = match message.role {
        Role::User => "message user-message",
        Role::Bot => "message bot-message",
    };
    let inner = match &message.body {
        MessageBody::Notice(text) => (*text).to_string(),
        MessageBody::Text(text) => escape(text),
        MessageBody::Answer { text, citations } => {
            let mut html = format!("<div class=\"answer\">{}</div>", escape(text));
            if !citations.is_empty() {
                html.push_str("<div class=\"sources\"><strong>Sources:</strong><ul>");
                for source in citations {
                    let _ = write!(
                        html,
                        "<li><em>{}</em> - Page {}</li>",
                        escape(&source.document_name),
                        source.page_number
                    );
                }
                html.push_str("</ul></div>");
            }
            html
        }
        MessageBody::Error(text) => error_line(&format!("Error: {}", escape(text))),
        MessageBody::Loading(progress) => {
            return format!(
                "<div class=\"{class} loading-animated\">{}</div>",
                progress_fragment(progress)
            );
        }
    };
    format!("<div class=\"{class}\">{inner}</div>")
}

pub fn transcript(view: &ChatPanelView) -> String {
    view.messages.iter().map(chat_message).collect()
}

fn progress_fragment(progress: &ProgressView) -> String {
    format!(
        "<div class=\"loading-status\">{}</div><div class=\"loading-progress\"><div class=\"progress-bar\" style=\"width: {}%\"></div></div>",
        progress.label, progress.percent
    )
}

/// `message` must already be safe markup.
fn error_line(message: &str) -> String {
    format!("<div class=\"error\">{message}</div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::PageView;
    use crate::SourceRef;

    #[test]
    fn page_text_is_escaped_but_label_is_not() {
        let view = OcrResultView::Pages(vec![PageView {
            label: "Page 2".to_string(),
            text: "<img src=x onerror=alert(1)>".to_string(),
        }]);
        let html = ocr_result(&view);
        assert!(html.contains("<h5>Page 2</h5>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn answer_without_sources_has_no_citation_block() {
        let html = chat_message(&MessageView {
            role: Role::Bot,
            body: MessageBody::Answer {
                text: "42".to_string(),
                citations: Vec::new(),
            },
        });
        assert!(html.contains("42"));
        assert!(!html.contains("Sources:"));
    }

    #[test]
    fn citation_names_are_emphasized_and_escaped() {
        let html = chat_message(&MessageView {
            role: Role::Bot,
            body: MessageBody::Answer {
                text: "See the report.".to_string(),
                citations: vec![SourceRef {
                    document_name: "<b>annual</b>.pdf".to_string(),
                    page_number: 4,
                }],
            },
        });
        assert!(html.contains("<li><em>&lt;b&gt;annual&lt;/b&gt;.pdf</em> - Page 4</li>"));
    }

    #[test]
    fn failure_message_is_escaped() {
        let html = ocr_result(&OcrResultView::Failed("<b>boom</b>".to_string()));
        assert_eq!(
            html,
            "<div class=\"error\">Error processing PDF: &lt;b&gt;boom&lt;/b&gt;</div>"
        );
    }
}
