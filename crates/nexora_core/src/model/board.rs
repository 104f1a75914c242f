//! Project, board and list records.
//!
//! # Responsibility
//! - Define the container entities of the board hierarchy.
//! - Keep parent/child links as id references so snapshots can store every
//!   entity in a flat table.
//!
//! # Invariants
//! - Child id sequences never contain duplicates.
//! - `project_id`/`board_id` back-links always name the current owner.
//! - Member role is exactly one of `member` or `manager`.

use crate::model::ids::{BoardId, CardId, ListId, ProjectId};
use crate::model::validation::{normalize_email, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Top-level container. Owns its boards exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds. Used by dashboard sorting.
    pub created_at: i64,
    /// Ordered board ids.
    pub boards: Vec<BoardId>,
}

/// Board inside one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub project_id: ProjectId,
    pub title: String,
    /// Ordered list ids. Order is the display and drag order.
    pub lists: Vec<ListId>,
    /// Board sharing. Email uniqueness is the committer's responsibility.
    pub members: Vec<Member>,
}

/// Column of cards inside one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub board_id: BoardId,
    pub title: String,
    /// Ordered card ids.
    pub cards: Vec<CardId>,
}

impl List {
    /// Returns the position of `card_id` in this list.
    pub fn position_of(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|id| *id == card_id)
    }
}

/// Board access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Can view and edit cards.
    Member,
    /// Can additionally manage board sharing.
    Manager,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Manager => "manager",
        }
    }
}

impl Display for MemberRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "manager" => Ok(Self::Manager),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

/// One shared-board participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub email: String,
    pub role: MemberRole,
}

impl Member {
    /// Creates a member after a presence check on `email`.
    pub fn new(email: &str, role: MemberRole) -> Result<Self, ValidationError> {
        Ok(Self {
            email: normalize_email(email)?,
            role,
        })
    }
}
