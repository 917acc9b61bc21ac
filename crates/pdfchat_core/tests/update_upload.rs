use std::sync::Once;

use pdfchat_core::{
    update, AppState, ChosenFile, Document, DocumentId, Effect, Msg, RefreshReason, UploadPhase,
    DOCUMENTS_FAILED, INVALID_FILE, UPLOAD_FAILED,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn choose(state: AppState, path: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::FileChosen(Some(ChosenFile::from_path(path))))
}

#[test]
fn non_pdf_file_sets_error_without_effect() {
    init_logging();
    for name in ["notes.txt", "archive.pdf.zip", "pdf"] {
        let (state, effects) = choose(AppState::new(), name);

        assert!(effects.is_empty(), "{name} should not be uploaded");
        assert_eq!(state.last_error(), Some(INVALID_FILE));
        assert!(!state.pending_upload());
    }
}

#[test]
fn missing_file_sets_error_without_effect() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::FileChosen(None));

    assert!(effects.is_empty());
    assert_eq!(state.last_error(), Some(INVALID_FILE));
    assert!(!state.pending_upload());
}

#[test]
fn pdf_upload_is_case_insensitive_and_clears_error() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileChosen(None));
    let (state, effects) = choose(state, "/home/me/Contract.PDF");

    assert_eq!(
        effects,
        vec![Effect::UploadFile {
            file: ChosenFile {
                name: "Contract.PDF".to_string(),
                path: "/home/me/Contract.PDF".into(),
            }
        }]
    );
    assert!(state.pending_upload());
    assert_eq!(state.last_error(), None);
    assert!(!state.view().can_upload);
}

#[test]
fn successful_upload_refreshes_then_selects() {
    init_logging();
    let (state, _) = choose(AppState::new(), "policy.pdf");
    let (state, effects) = update(
        state,
        Msg::UploadSucceeded {
            document_id: DocumentId::Number(9),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::FetchDocuments {
            reason: RefreshReason::AfterUpload(DocumentId::Number(9))
        }]
    );
    // Selection waits for the refresh.
    assert_eq!(state.selected_document(), None);
    assert_eq!(
        state.upload_phase(),
        &UploadPhase::Refreshing(DocumentId::Number(9))
    );
    assert!(state.pending_upload());

    let (state, effects) = update(
        state,
        Msg::DocumentsLoaded {
            reason: RefreshReason::AfterUpload(DocumentId::Number(9)),
            documents: vec![Document {
                id: DocumentId::Number(9),
                filename: "policy.pdf".to_string(),
                upload_date: Some("2024-05-01T10:00:00".to_string()),
            }],
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.selected_document(), Some(&DocumentId::Number(9)));
    assert_eq!(state.documents().len(), 1);
    assert!(!state.pending_upload());
    assert!(state.messages().is_empty());
    assert_eq!(state.view().selected_filename.as_deref(), Some("policy.pdf"));
}

#[test]
fn upload_still_selects_when_follow_up_refresh_fails() {
    init_logging();
    let (state, _) = choose(AppState::new(), "policy.pdf");
    let (state, _) = update(
        state,
        Msg::UploadSucceeded {
            document_id: DocumentId::Number(3),
        },
    );
    let (state, _) = update(
        state,
        Msg::DocumentsFailed {
            reason: RefreshReason::AfterUpload(DocumentId::Number(3)),
        },
    );

    assert_eq!(state.selected_document(), Some(&DocumentId::Number(3)));
    assert_eq!(state.last_error(), Some(DOCUMENTS_FAILED));
    assert!(!state.pending_upload());
}

#[test]
fn failed_upload_keeps_selection_and_resets_pending() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::DocumentSelected(Some(DocumentId::Number(1))),
    );
    let (state, _) = choose(state, "policy.pdf");
    let (state, effects) = update(state, Msg::UploadFailed);

    assert!(effects.is_empty());
    assert_eq!(state.last_error(), Some(UPLOAD_FAILED));
    assert_eq!(state.selected_document(), Some(&DocumentId::Number(1)));
    assert!(!state.pending_upload());
    assert!(state.view().can_upload);
}

#[test]
fn second_upload_is_rejected_while_one_is_pending() {
    init_logging();
    let (mut state, _) = choose(AppState::new(), "first.pdf");
    state.consume_dirty();

    let (mut state, effects) = choose(state, "second.pdf");

    assert!(effects.is_empty());
    assert_eq!(state.upload_phase(), &UploadPhase::Sending);
    assert!(!state.consume_dirty());
}

#[test]
fn upload_is_rejected_during_follow_up_refresh() {
    init_logging();
    let (state, _) = choose(AppState::new(), "first.pdf");
    let (state, _) = update(
        state,
        Msg::UploadSucceeded {
            document_id: DocumentId::Number(4),
        },
    );

    let (state, effects) = choose(state, "second.pdf");

    assert!(effects.is_empty());
    assert_eq!(
        state.upload_phase(),
        &UploadPhase::Refreshing(DocumentId::Number(4))
    );
}

#[test]
fn unrelated_refresh_does_not_finish_upload() {
    init_logging();
    let (state, _) = choose(AppState::new(), "policy.pdf");
    let (state, _) = update(
        state,
        Msg::UploadSucceeded {
            document_id: DocumentId::Number(5),
        },
    );
    let (state, _) = update(
        state,
        Msg::DocumentsLoaded {
            reason: RefreshReason::Startup,
            documents: Vec::new(),
        },
    );

    assert!(state.pending_upload());
    assert_eq!(state.selected_document(), None);
}

#[test]
fn stray_upload_result_is_ignored() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::UploadSucceeded {
            document_id: DocumentId::Number(1),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.pending_upload());
    assert_eq!(state.selected_document(), None);
}

#[test]
fn repeated_invalid_file_raises_a_new_error_each_time() {
    init_logging();
    let (mut state, _) = choose(AppState::new(), "notes.txt");
    let first = state.view().error_seq;
    state.consume_dirty();

    let (mut state, _) = choose(state, "notes.txt");

    assert_eq!(state.last_error(), Some(INVALID_FILE));
    assert!(state.view().error_seq > first);
    assert!(state.consume_dirty());
}
