//! Terminal line input mapped onto session messages.
//!
//! A line of text is the question box followed by Enter. A trailing
//! backslash stands in for Shift+Enter: the line is kept and a newline is
//! inserted instead of submitting. Lines starting with `:` are commands.

use std::fs;
use std::path::Path;

use console_core::{Msg, PanelKind, SelectedFile};

pub const HELP: &str = "\
Commands:
  :ocr            open the OCR demo
  :llm            open the question-answering demo
  :upload <path>  send a PDF to OCR (OCR demo only)
  :ask            submit the question typed so far (LLM demo only)
  :close          close the demo panel
  :help           show this help
  :quit           exit
Any other line is a question for the LLM demo. End a line with \\ to continue
the question on the next line.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

pub fn parse_line(line: &str, current_input: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    if let Some(command) = trimmed.strip_prefix(':') {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        return match name {
            "ocr" => Ok(Command::Dispatch(vec![Msg::ShowPanel(PanelKind::Ocr)])),
            "llm" => Ok(Command::Dispatch(vec![Msg::ShowPanel(PanelKind::Llm)])),
            "close" => Ok(Command::Dispatch(vec![Msg::ClosePanel])),
            "ask" => Ok(Command::Dispatch(vec![Msg::AskSubmitted])),
            "upload" => select_file(arg).map(|file| Command::Dispatch(vec![Msg::FileSelected(file)])),
            "help" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command :{other} (try :help)")),
        };
    }

    let (text, shift) = match line.strip_suffix('\\') {
        Some(rest) => (rest, true),
        None => (line, false),
    };
    Ok(Command::Dispatch(vec![
        Msg::ChatInputChanged(format!("{current_input}{text}")),
        Msg::EnterPressed { shift },
    ]))
}

/// Reads file metadata the way a file picker would; an empty path dismisses it.
fn select_file(arg: &str) -> Result<Option<SelectedFile>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    let path = Path::new(arg);
    let meta = fs::metadata(path).map_err(|err| format!("cannot open {arg}: {err}"))?;
    if !meta.is_file() {
        return Err(format!("{arg} is not a file"));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg.to_string());
    Ok(Some(SelectedFile::new(name, meta.len(), path)))
}
