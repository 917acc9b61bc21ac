use chat_logging::{chat_debug, chat_info, chat_warn};

use crate::{
    is_pdf_file_name, AppState, ChosenFile, Effect, Message, Msg, RefreshReason, UploadPhase,
};

pub const DOCUMENTS_FAILED: &str = "Failed to fetch documents. Please try again.";
pub const INVALID_FILE: &str = "Please select a valid PDF file";
pub const UPLOAD_FAILED: &str = "Failed to upload file. Please try again.";
pub const ASK_FAILED: &str = "Failed to get response. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::FetchDocuments {
            reason: RefreshReason::Startup,
        }],
        Msg::RefreshRequested => vec![Effect::FetchDocuments {
            reason: RefreshReason::Manual,
        }],
        Msg::DocumentsLoaded { reason, documents } => {
            chat_debug!("Registry loaded ({:?}): {} documents", reason, documents.len());
            state.replace_documents(documents);
            finish_upload_refresh(&mut state, reason);
            Vec::new()
        }
        Msg::DocumentsFailed { reason } => {
            state.set_error(DOCUMENTS_FAILED);
            finish_upload_refresh(&mut state, reason);
            Vec::new()
        }
        Msg::DocumentSelected(id) => {
            if id.is_none() && state.pending_ask() {
                chat_warn!("Ignoring selection clear while a question is in flight");
            } else {
                state.select(id);
            }
            Vec::new()
        }
        Msg::FileChosen(file) => submit_upload(&mut state, file),
        Msg::UploadSucceeded { document_id } => {
            if state.upload_phase() != &UploadPhase::Sending {
                chat_warn!("Ignoring upload result {} with no upload in flight", document_id);
                return (state, Vec::new());
            }
            chat_info!("Upload accepted as document {}", document_id);
            state.set_upload_phase(UploadPhase::Refreshing(document_id.clone()));
            vec![Effect::FetchDocuments {
                reason: RefreshReason::AfterUpload(document_id),
            }]
        }
        Msg::UploadFailed => {
            if state.upload_phase() == &UploadPhase::Sending {
                state.set_error(UPLOAD_FAILED);
                state.set_upload_phase(UploadPhase::Idle);
            }
            Vec::new()
        }
        Msg::DraftChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::QuestionSubmitted { at } => submit_question(&mut state, at),
        Msg::AnswerReceived {
            answer,
            sources,
            at,
        } => {
            if state.pending_ask() {
                state.push_message(Message::assistant(answer, sources, at));
                state.set_pending_ask(false);
            } else {
                chat_warn!("Dropping answer with no question in flight");
            }
            Vec::new()
        }
        Msg::AskFailed => {
            if state.pending_ask() {
                state.set_error(ASK_FAILED);
                state.set_pending_ask(false);
            }
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
    };

    (state, effects)
}

fn submit_upload(state: &mut AppState, file: Option<ChosenFile>) -> Vec<Effect> {
    let file = match file {
        Some(file) if is_pdf_file_name(&file.name) => file,
        other => {
            chat_debug!("Rejected upload candidate {:?}", other.map(|f| f.name));
            state.set_error(INVALID_FILE);
            return Vec::new();
        }
    };
    if state.pending_upload() {
        chat_warn!("Upload of {} rejected: another upload is in flight", file.name);
        return Vec::new();
    }

    chat_info!("Uploading {}", file.name);
    state.set_upload_phase(UploadPhase::Sending);
    state.clear_error();
    vec![Effect::UploadFile { file }]
}

fn submit_question(state: &mut AppState, at: chrono::DateTime<chrono::Utc>) -> Vec<Effect> {
    let Some(document_id) = state.selected_document().cloned() else {
        return Vec::new();
    };
    if state.draft().trim().is_empty() {
        return Vec::new();
    }
    if state.pending_ask() {
        chat_warn!("Question rejected: another question is in flight");
        return Vec::new();
    }

    let question = state.take_draft();
    state.push_message(Message::user(question.clone(), at));
    state.set_pending_ask(true);
    state.clear_error();
    vec![Effect::AskQuestion {
        document_id,
        question,
    }]
}

/// Completes the upload pipeline once its follow-up refresh resolved,
/// whether or not the refresh itself succeeded.
fn finish_upload_refresh(state: &mut AppState, reason: RefreshReason) {
    let RefreshReason::AfterUpload(document_id) = reason else {
        return;
    };
    if !matches!(state.upload_phase(), UploadPhase::Refreshing(_)) {
        return;
    }
    state.select(Some(document_id));
    state.set_upload_phase(UploadPhase::Idle);
}
