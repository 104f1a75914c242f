//! Create drafts and partial-update patches.
//!
//! # Responsibility
//! - Carry caller payloads for create/update operations.
//! - Normalize and validate payloads before they reach a snapshot.
//!
//! # Invariants
//! - Patches use shallow field replacement: `None` leaves a field untouched,
//!   `Some(value)` replaces it wholesale.
//! - Normalized patches never carry blank titles, blank member emails or
//!   duplicate labels. Member lists keep their order and duplicates.

use crate::model::board::{Board, Member, Project};
use crate::model::card::{Card, Comment};
use crate::model::validation::{
    normalize_email, normalize_labels, normalize_title, ValidationError,
};

/// Payload for `add_project`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ProjectPatch {
    pub(crate) fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: self
                .title
                .map(|title| normalize_title("project", &title))
                .transpose()?,
            description: self.description,
        })
    }

    pub(crate) fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
    }
}

/// Payload for `add_board`. Lists are added separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDraft {
    pub title: String,
    pub members: Vec<Member>,
}

impl BoardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    pub(crate) fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_title("board", &self.title)?,
            members: normalize_members(self.members)?,
        })
    }
}

/// Partial update for a board.
///
/// `members: Some(..)` replaces the whole member set; entries are stored
/// as given, without deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    pub title: Option<String>,
    pub members: Option<Vec<Member>>,
}

impl BoardPatch {
    /// Patch that only commits a new member set.
    pub fn members(members: Vec<Member>) -> Self {
        Self {
            title: None,
            members: Some(members),
        }
    }

    pub(crate) fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: self
                .title
                .map(|title| normalize_title("board", &title))
                .transpose()?,
            members: self.members.map(normalize_members).transpose()?,
        })
    }

    pub(crate) fn apply_to(&self, board: &mut Board) {
        if let Some(title) = &self.title {
            board.title = title.clone();
        }
        if let Some(members) = &self.members {
            board.members = members.clone();
        }
    }
}

/// Payload for `add_card`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub assigned_members: Vec<String>,
    pub due_date: Option<i64>,
    pub attachments: Vec<String>,
    pub comments: Vec<Comment>,
}

impl CardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due_date(mut self, due_date: i64) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_title("card", &self.title)?,
            labels: normalize_labels(&self.labels),
            ..self
        })
    }
}

/// Partial update for a card.
///
/// Double-`Option` fields distinguish "leave as is" (`None`) from
/// "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub labels: Option<Vec<String>>,
    pub assigned_members: Option<Vec<String>>,
    pub due_date: Option<Option<i64>>,
    pub attachments: Option<Vec<String>>,
    pub comments: Option<Vec<Comment>>,
}

impl CardPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub(crate) fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: self
                .title
                .map(|title| normalize_title("card", &title))
                .transpose()?,
            labels: self.labels.map(normalize_labels),
            ..self
        })
    }

    pub(crate) fn apply_to(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title = title.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(labels) = &self.labels {
            card.labels = labels.clone();
        }
        if let Some(assigned_members) = &self.assigned_members {
            card.assigned_members = assigned_members.clone();
        }
        if let Some(due_date) = self.due_date {
            card.due_date = due_date;
        }
        if let Some(attachments) = &self.attachments {
            card.attachments = attachments.clone();
        }
        if let Some(comments) = &self.comments {
            card.comments = comments.clone();
        }
    }
}

fn normalize_members(members: Vec<Member>) -> Result<Vec<Member>, ValidationError> {
    members
        .into_iter()
        .map(|member| {
            Ok(Member {
                email: normalize_email(&member.email)?,
                role: member.role,
            })
        })
        .collect()
}
