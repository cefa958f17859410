use crate::{DemoSession, Effect, Msg};

/// Pure update function: applies a message to the session and returns any effects.
///
/// This is the single place where the session changes. Progress ticks and
/// settlements arrive here tagged with their request id; the session drops
/// any that do not belong to the request a mounted panel is waiting on, so a
/// settlement is rendered at most once and no tick lands after it.
pub fn update(mut state: DemoSession, msg: Msg) -> (DemoSession, Vec<Effect>) {
    let effects = match msg {
        Msg::ShowPanel(panel) => state.show_panel(panel),
        Msg::ClosePanel => state.close_panel(),
        Msg::FileSelected(file) => state.submit_upload(file),
        Msg::ChatInputChanged(text) => {
            state.set_chat_input(text);
            Vec::new()
        }
        Msg::EnterPressed { shift } => state.press_enter(shift),
        Msg::AskSubmitted => state.ask(),
        Msg::ProgressTick {
            request_id,
            stage_index,
        } => {
            state.apply_tick(request_id, stage_index);
            Vec::new()
        }
        Msg::OcrSettled { request_id, result } => state.settle_ocr(request_id, result),
        Msg::ChatSettled { request_id, result } => state.settle_chat(request_id, result),
    };

    (state, effects)
}
