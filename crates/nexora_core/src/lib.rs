//! Core domain logic for Nexora.
//! This crate owns the board data model, the mutation store and drag
//! reconciliation; UI layers consume it through snapshots.

pub mod auth;
pub mod drag;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;

pub use drag::drag_id::{DragId, DragIdError};
pub use drag::reconcile::{array_move, plan_drop, reconcile, DropPlan};
pub use drag::session::{DragSession, DragState, DropOutcome};
pub use logging::{init_logging, init_logging_from, logging_status, LogLevel, LoggingConfig, LoggingError};
pub use model::board::{Board, List, Member, MemberRole, Project};
pub use model::card::{Card, Comment};
pub use model::ids::{BoardId, CardId, ListId, NotificationId, ProjectId};
pub use model::notification::Notification;
pub use model::validation::ValidationError;
pub use store::patch::{BoardDraft, BoardPatch, CardDraft, CardPatch, ProjectDraft, ProjectPatch};
pub use store::snapshot::Snapshot;
pub use store::tree::{BoardTree, ListTree, ProjectTree};
pub use store::{BoardStore, Outcome, SkipReason, StoreError, StoreResult, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
