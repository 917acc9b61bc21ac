use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A cited passage backing an assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub page: i64,
    pub content: String,
}

/// One turn of the conversation. Messages are only ever appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Always empty for user messages.
    pub sources: Vec<Source>,
}

impl Message {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp,
            sources: Vec::new(),
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        sources: Vec<Source>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp,
            sources,
        }
    }
}
