//! Composite draggable/droppable identifiers.
//!
//! UI layers tag every sortable element with `list-<uuid>` or `card-<uuid>`;
//! the prefix decides which reconciliation branch applies.

use crate::model::ids::{CardId, ListId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const LIST_PREFIX: &str = "list-";
const CARD_PREFIX: &str = "card-";

/// Kind-tagged id of a drag source or drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragId {
    List(ListId),
    Card(CardId),
}

impl DragId {
    pub fn is_list(self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_card(self) -> bool {
        matches!(self, Self::Card(_))
    }
}

impl Display for DragId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(id) => write!(f, "{LIST_PREFIX}{id}"),
            Self::Card(id) => write!(f, "{CARD_PREFIX}{id}"),
        }
    }
}

impl FromStr for DragId {
    type Err = DragIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Some(raw) = value.strip_prefix(LIST_PREFIX) {
            return raw
                .parse()
                .map(Self::List)
                .map_err(|_| DragIdError::InvalidId(value.to_string()));
        }
        if let Some(raw) = value.strip_prefix(CARD_PREFIX) {
            return raw
                .parse()
                .map(Self::Card)
                .map_err(|_| DragIdError::InvalidId(value.to_string()));
        }
        Err(DragIdError::UnknownKind(value.to_string()))
    }
}

/// Parse errors for composite drag ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragIdError {
    /// Prefix is neither `list-` nor `card-`.
    UnknownKind(String),
    /// Prefix is known but the remainder is not a valid id.
    InvalidId(String),
}

impl Display for DragIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKind(value) => write!(f, "unrecognized drag id kind: `{value}`"),
            Self::InvalidId(value) => write!(f, "malformed drag id: `{value}`"),
        }
    }
}

impl Error for DragIdError {}
