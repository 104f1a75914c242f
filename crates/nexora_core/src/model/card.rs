//! Card record and its comment thread.
//!
//! # Invariants
//! - `title` is trimmed and non-empty once stored.
//! - `labels` contains no duplicates.
//! - `list_id` names the one list that currently holds the card.

use crate::model::ids::{CardId, ListId};
use serde::{Deserialize, Serialize};

/// Work item inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Owning list. Rewritten when the card moves.
    pub list_id: ListId,
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    /// Emails of assigned board members.
    pub assigned_members: Vec<String>,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    /// Opaque attachment references (file names / blob ids).
    pub attachments: Vec<String>,
    pub comments: Vec<Comment>,
}

impl Card {
    /// Returns whether the due date lies strictly before `now_ms`.
    pub fn is_overdue(&self, now_ms: i64) -> bool {
        self.due_date.is_some_and(|due| due < now_ms)
    }
}

/// One comment on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}
