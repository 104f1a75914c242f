//! Structural validation predicates shared by store write paths.
//!
//! # Responsibility
//! - Normalize user-entered text fields before they reach a snapshot.
//! - Reject writes that would break entity invariants.
//!
//! # Invariants
//! - Titles are stored trimmed and non-empty.
//! - Email checks are presence-only; syntax is not validated.
//! - Label sets never contain blanks or duplicates.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors raised before any mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is blank after trim. Carries the entity kind (`project`, `card`, ...).
    EmptyTitle(&'static str),
    /// Member email is blank after trim.
    EmptyEmail,
    /// Comment author is blank after trim.
    EmptyAuthor,
    /// Comment text is blank after trim.
    EmptyComment,
    /// Attachment name is blank after trim.
    EmptyAttachmentName,
    /// Role string is not `member` or `manager`.
    UnknownRole(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle(kind) => write!(f, "{kind} title must not be blank"),
            Self::EmptyEmail => write!(f, "member email must not be blank"),
            Self::EmptyAuthor => write!(f, "comment author must not be blank"),
            Self::EmptyComment => write!(f, "comment text must not be blank"),
            Self::EmptyAttachmentName => write!(f, "attachment name must not be blank"),
            Self::UnknownRole(value) => {
                write!(f, "unknown member role `{value}`; expected member|manager")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims a title and rejects blank values.
pub fn normalize_title(kind: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle(kind));
    }
    Ok(trimmed.to_string())
}

/// Trims an email and rejects blank values.
pub fn normalize_email(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    Ok(trimmed.to_string())
}

/// Trims labels, drops blanks, and removes duplicates keeping first occurrence.
pub fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for label in labels {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}
