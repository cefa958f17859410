use crate::{AnswerResult, OcrPageResult, PanelKind, RequestFailure, RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User opened one of the demo panels.
    ShowPanel(PanelKind),
    /// User closed the demo section.
    ClosePanel,
    /// File picker changed; `None` when the picker was dismissed.
    FileSelected(Option<SelectedFile>),
    /// User edited the question box.
    ChatInputChanged(String),
    /// Enter in the question box, with or without Shift held.
    EnterPressed { shift: bool },
    /// User clicked Ask.
    AskSubmitted,
    /// Engine ticker advanced a request to `stage_index`.
    ProgressTick {
        request_id: RequestId,
        stage_index: usize,
    },
    /// OCR request settled.
    OcrSettled {
        request_id: RequestId,
        result: Result<Vec<OcrPageResult>, RequestFailure>,
    },
    /// LLM request settled.
    ChatSettled {
        request_id: RequestId,
        result: Result<AnswerResult, RequestFailure>,
    },
}
