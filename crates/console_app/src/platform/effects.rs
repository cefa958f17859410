use std::sync::Arc;

use console_core::{
    AnswerResult, Effect, Msg, OcrPageResult, RequestFailure, SourceRef, TickerPlan,
};
use console_engine::{
    Answer, Backend, EngineEvent, EngineHandle, OcrPage, RequestError, TickerSpec,
};
use console_logging::{console_debug, console_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(backend)?,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartOcr {
                    request_id,
                    file,
                    ticker,
                } => {
                    console_info!(
                        "StartOcr request_id={} file={} size={}",
                        request_id,
                        file.name,
                        file.size
                    );
                    self.engine
                        .run_ocr(request_id, file.path, file.name, ticker_spec(ticker));
                }
                Effect::StartChat {
                    request_id,
                    question,
                    ticker,
                } => {
                    console_info!(
                        "StartChat request_id={} question_len={}",
                        request_id,
                        question.len()
                    );
                    self.engine
                        .run_chat(request_id, question, ticker_spec(ticker));
                }
                Effect::ScrollIntoView(_) | Effect::ScrollChatToBottom | Effect::HideDemo => {
                    // The terminal redraws the whole frame; nothing to scroll.
                    console_debug!("{:?}", effect);
                }
            }
        }
    }

    /// Next engine event already waiting, translated into a message.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn ticker_spec(plan: TickerPlan) -> TickerSpec {
    TickerSpec {
        stage_count: plan.stage_count,
        interval: plan.interval,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress {
            request_id,
            stage_index,
        } => Msg::ProgressTick {
            request_id,
            stage_index,
        },
        EngineEvent::OcrCompleted { request_id, result } => Msg::OcrSettled {
            request_id,
            result: result
                .map(|pages| pages.into_iter().map(map_page).collect())
                .map_err(map_failure),
        },
        EngineEvent::ChatCompleted { request_id, result } => Msg::ChatSettled {
            request_id,
            result: result.map(map_answer).map_err(map_failure),
        },
    }
}

fn map_page(page: OcrPage) -> OcrPageResult {
    OcrPageResult {
        page_number: page.page_number,
        extracted_text: page.md_text,
    }
}

fn map_answer(answer: Answer) -> AnswerResult {
    AnswerResult {
        answer_text: answer.answer,
        sources: answer
            .sources
            .into_iter()
            .map(|source| SourceRef {
                document_name: source.pdf_name,
                page_number: source.page_number,
            })
            .collect(),
    }
}

fn map_failure(err: RequestError) -> RequestFailure {
    RequestFailure::new(err.message)
}
