//! Mutation store: the single source of truth for board data.
//!
//! # Responsibility
//! - Hold one canonical `Snapshot` of projects and notifications.
//! - Expose CRUD and move operations that replace the snapshot atomically.
//! - Notify subscribed observers after every applied mutation.
//!
//! # Invariants
//! - Validation runs before any mutation; a rejected write changes nothing.
//! - Operations addressed at a missing id are silent no-ops that report
//!   `Outcome::Skipped` and do not notify observers.
//! - Readers only ever see fully-formed snapshots.

mod board_store;
pub mod patch;
mod seed;
pub mod snapshot;
pub mod tree;

pub use board_store::{BoardStore, Observer, SubscriptionId};

use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Payload failed structural validation; nothing was written.
    Validation(ValidationError),
    /// A multi-step write could not resolve an entity it had just created.
    InconsistentState(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Why a transformation left the snapshot untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ProjectNotFound,
    BoardNotFound,
    ListNotFound,
    CardNotFound,
    NotificationNotFound,
    /// `reorder_lists` received something other than a permutation of the
    /// board's current lists.
    NotAPermutation,
    /// An inserted record reused an id that is already in its table.
    DuplicateId,
    /// An inserted record arrived with children already attached.
    NonEmptyChildren,
}

impl SkipReason {
    /// Stable token used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectNotFound => "project_not_found",
            Self::BoardNotFound => "board_not_found",
            Self::ListNotFound => "list_not_found",
            Self::CardNotFound => "card_not_found",
            Self::NotificationNotFound => "notification_not_found",
            Self::NotAPermutation => "not_a_permutation",
            Self::DuplicateId => "duplicate_id",
            Self::NonEmptyChildren => "non_empty_children",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an update/delete/move operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Snapshot was replaced and observers were notified.
    Applied,
    /// Snapshot is unchanged.
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
