//! PdfChat core: pure conversation/upload state machine and view-model helpers.
mod conversation;
mod document;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use conversation::{Message, Role, Source};
pub use document::{is_pdf_file_name, ChosenFile, Document, DocumentId};
pub use effect::{Effect, RefreshReason};
pub use msg::Msg;
pub use state::{AppState, UploadPhase};
pub use update::{update, ASK_FAILED, DOCUMENTS_FAILED, INVALID_FILE, UPLOAD_FAILED};
pub use view_model::{AppViewModel, DocumentRowView};
