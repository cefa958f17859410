#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScrollIntoView(crate::PanelKind),
    ScrollChatToBottom,
    HideDemo,
    StartOcr {
        request_id: crate::RequestId,
        file: crate::SelectedFile,
        ticker: crate::TickerPlan,
    },
    StartChat {
        request_id: crate::RequestId,
        question: String,
        ticker: crate::TickerPlan,
    },
}
