use chrono::Local;
use pdfchat_core::{AppViewModel, Message, Role};

/// Tracks what has already been printed so each render only emits changes.
///
/// The transcript only grows, so printing the unseen tail is the terminal
/// equivalent of keeping the message list scrolled to its end.
#[derive(Debug, Default)]
pub struct TranscriptCursor {
    printed_messages: usize,
    last_status: Option<String>,
    error_seq: u64,
}

pub fn render(cursor: &mut TranscriptCursor, view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    // A repeated error has the same text but a new sequence number.
    if view.error_seq != cursor.error_seq {
        if let Some(error) = &view.error {
            lines.push(format!("! {error}"));
        }
        cursor.error_seq = view.error_seq;
    }

    for message in view.messages.iter().skip(cursor.printed_messages) {
        lines.extend(format_message(message));
    }
    cursor.printed_messages = view.messages.len();

    let status = status_line(view);
    if cursor.last_status.as_ref() != Some(&status) {
        lines.push(status.clone());
        cursor.last_status = Some(status);
    }

    lines
}

pub fn status_line(view: &AppViewModel) -> String {
    let document = match (&view.selected_document, &view.selected_filename) {
        (Some(id), Some(name)) => format!("{name} (#{id})"),
        (Some(id), None) => format!("#{id}"),
        (None, _) => "none selected".to_string(),
    };
    let mut status = format!("-- Document: {document} | {} known", view.documents.len());
    if view.pending_upload {
        status.push_str(" | uploading...");
    }
    if view.pending_ask {
        status.push_str(" | waiting for answer...");
    }
    status.push_str(" --");
    status
}

pub fn format_documents(view: &AppViewModel) -> Vec<String> {
    if view.documents.is_empty() {
        return vec!["No documents uploaded yet.".to_string()];
    }
    view.documents
        .iter()
        .map(|row| {
            let marker = if row.selected { '*' } else { ' ' };
            match &row.upload_date {
                Some(date) => format!("{marker} {:>4}  {}  ({date})", row.id, row.filename),
                None => format!("{marker} {:>4}  {}", row.id, row.filename),
            }
        })
        .collect()
}

fn format_message(message: &Message) -> Vec<String> {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");
    let mut lines = vec![format!("[{time}] {who}: {}", message.content)];
    lines.extend(
        message
            .sources
            .iter()
            .map(|source| format!("    Page {}: {}", source.page, source.content)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pdfchat_core::{update, AppState, DocumentId, DocumentRowView, Msg, RefreshReason, Source};

    fn at() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn only_new_messages_are_printed() {
        let mut cursor = TranscriptCursor::default();
        let mut view = AppViewModel {
            messages: vec![Message::user("hello", at())],
            ..AppViewModel::default()
        };

        let first = render(&mut cursor, &view);
        assert!(first[0].ends_with("You: hello"));
        assert_eq!(first.len(), 2); // message + status

        view.messages.push(Message::assistant(
            "hi",
            vec![Source {
                page: 2,
                content: "greeting".to_string(),
            }],
            at(),
        ));
        let second = render(&mut cursor, &view);
        assert_eq!(second.len(), 2);
        assert!(second[0].ends_with("Assistant: hi"));
        assert_eq!(second[1], "    Page 2: greeting");

        assert!(render(&mut cursor, &view).is_empty());
    }

    #[test]
    fn error_banner_is_printed_once_per_raise() {
        let mut cursor = TranscriptCursor::default();
        let mut view = AppViewModel {
            error: Some("Failed to upload file. Please try again.".to_string()),
            error_seq: 1,
            ..AppViewModel::default()
        };

        let lines = render(&mut cursor, &view);
        assert_eq!(lines[0], "! Failed to upload file. Please try again.");
        assert!(render(&mut cursor, &view).is_empty());

        view.error = None;
        assert!(render(&mut cursor, &view).is_empty());
    }

    #[test]
    fn same_error_twice_is_printed_twice() {
        let mut state = AppState::new();
        let mut cursor = TranscriptCursor::default();
        let mut banners = Vec::new();

        for _ in 0..2 {
            let (next, _) = update(state, Msg::RefreshRequested);
            let (mut next, _) = update(
                next,
                Msg::DocumentsFailed {
                    reason: RefreshReason::Manual,
                },
            );
            assert!(next.consume_dirty());
            let lines = render(&mut cursor, &next.view());
            banners.push(lines.into_iter().filter(|l| l.starts_with("! ")).count());
            state = next;
        }

        assert_eq!(banners, vec![1, 1]);
    }

    #[test]
    fn status_reflects_selection_and_pending_work() {
        let view = AppViewModel {
            selected_document: Some(DocumentId::Number(2)),
            selected_filename: Some("b.pdf".to_string()),
            pending_upload: true,
            pending_ask: true,
            ..AppViewModel::default()
        };
        assert_eq!(
            status_line(&view),
            "-- Document: b.pdf (#2) | 0 known | uploading... | waiting for answer... --"
        );
    }

    #[test]
    fn document_list_marks_selection() {
        let view = AppViewModel {
            documents: vec![
                DocumentRowView {
                    id: DocumentId::Number(1),
                    filename: "a.pdf".to_string(),
                    upload_date: Some("2024-05-01T10:00:00".to_string()),
                    selected: false,
                },
                DocumentRowView {
                    id: DocumentId::Number(2),
                    filename: "b.pdf".to_string(),
                    upload_date: None,
                    selected: true,
                },
            ],
            ..AppViewModel::default()
        };

        assert_eq!(
            format_documents(&view),
            vec![
                "     1  a.pdf  (2024-05-01T10:00:00)".to_string(),
                "*    2  b.pdf".to_string(),
            ]
        );
    }
}
