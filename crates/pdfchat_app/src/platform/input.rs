use chrono::{DateTime, Utc};
use pdfchat_core::{AppViewModel, ChosenFile, DocumentId, Msg};

use super::ui::render::format_documents;

pub const HELP: &str = "\
Commands:
  /docs            list uploaded documents
  /refresh         reload the document list
  /upload <path>   upload a PDF and select it
  /select <id>     select a document to ask about
  /unselect        clear the selection
  /dismiss         hide the current error
  /ask <text>      ask a question that starts with '/'
  /help            show this help
  /quit            exit
Anything else is sent as a question about the selected document.";

/// What the app loop should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Print text locally without touching state.
    Print(Vec<String>),
    Dispatch(Vec<Msg>),
}

/// Interprets one input line against the current view. Controls that the
/// view reports as disabled print a hint instead of dispatching.
pub fn interpret(line: &str, view: &AppViewModel, now: DateTime<Utc>) -> Action {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Action::Print(Vec::new());
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return ask(line, view, now);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "quit" | "exit" => Action::Quit,
        "help" => Action::Print(HELP.lines().map(str::to_string).collect()),
        "docs" => Action::Print(format_documents(view)),
        "refresh" => Action::Dispatch(vec![Msg::RefreshRequested]),
        "dismiss" => Action::Dispatch(vec![Msg::ErrorDismissed]),
        "ask" if arg.is_empty() => hint("Usage: /ask <question>"),
        "ask" => ask(arg, view, now),
        "upload" => {
            if !view.can_upload {
                return hint("An upload is already in progress.");
            }
            let file = (!arg.is_empty()).then(|| ChosenFile::from_path(arg));
            Action::Dispatch(vec![Msg::FileChosen(file)])
        }
        "select" => match DocumentId::parse(arg) {
            Some(id) => Action::Dispatch(vec![Msg::DocumentSelected(Some(id))]),
            None => hint("Usage: /select <id>"),
        },
        "unselect" => {
            if view.pending_ask {
                return hint("Wait for the current answer before clearing the selection.");
            }
            Action::Dispatch(vec![Msg::DocumentSelected(None)])
        }
        other => hint(&format!("Unknown command /{other}. Type /help for commands.")),
    }
}

fn ask(line: &str, view: &AppViewModel, now: DateTime<Utc>) -> Action {
    if view.selected_document.is_none() {
        return hint("Select a document first (/docs, /select <id>).");
    }
    if !view.can_ask {
        return hint("Still waiting for the previous answer.");
    }
    Action::Dispatch(vec![
        Msg::DraftChanged(line.to_string()),
        Msg::QuestionSubmitted { at: now },
    ])
}

fn hint(text: &str) -> Action {
    Action::Print(vec![text.to_string()])
}
