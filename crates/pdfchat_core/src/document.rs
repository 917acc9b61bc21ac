use std::fmt;
use std::path::PathBuf;

/// Backend-assigned document identifier.
///
/// The service may hand out numeric or textual ids; the received shape is
/// kept so it can be echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    Number(i64),
    Text(String),
}

impl DocumentId {
    /// Parses user input: integers become `Number`, anything else `Text`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i64>() {
            Ok(n) => DocumentId::Number(n),
            Err(_) => DocumentId::Text(raw.to_string()),
        })
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        DocumentId::Number(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        DocumentId::Text(value.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Number(n) => f.pad(&n.to_string()),
            DocumentId::Text(s) => f.pad(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    /// Upload time exactly as reported by the service, if any.
    pub upload_date: Option<String>,
}

/// A file picked by the user for upload. Only the name is inspected by the
/// core; the path is handed to the effect runner untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenFile {
    pub name: String,
    pub path: PathBuf,
}

impl ChosenFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }
}

/// True when `name` ends in `.pdf`, ignoring ASCII case.
pub fn is_pdf_file_name(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_suffix_is_case_insensitive() {
        assert!(is_pdf_file_name("report.pdf"));
        assert!(is_pdf_file_name("REPORT.PDF"));
        assert!(is_pdf_file_name("scan.Pdf"));
        assert!(!is_pdf_file_name("report.pdf.txt"));
        assert!(!is_pdf_file_name("notes.docx"));
        assert!(!is_pdf_file_name("pdf"));
        assert!(!is_pdf_file_name(""));
    }

    #[test]
    fn non_ascii_names_do_not_panic() {
        assert!(!is_pdf_file_name("résumé"));
        assert!(is_pdf_file_name("résumé.pdf"));
    }

    #[test]
    fn document_id_parse_prefers_numbers() {
        assert_eq!(DocumentId::parse(" 7 "), Some(DocumentId::Number(7)));
        assert_eq!(
            DocumentId::parse("abc-1"),
            Some(DocumentId::Text("abc-1".to_string()))
        );
        assert_eq!(DocumentId::parse("   "), None);
    }

    #[test]
    fn chosen_file_takes_name_from_path() {
        let file = ChosenFile::from_path("/tmp/docs/Policy.PDF");
        assert_eq!(file.name, "Policy.PDF");
    }
}
