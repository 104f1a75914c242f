//! Entity model for the project → board → list → card hierarchy.
//!
//! # Responsibility
//! - Define plain data records shared by the store, drag engine and views.
//! - Provide structural validation used before every write.
//!
//! # Invariants
//! - Every entity is identified by a typed, store-generated id.
//! - Parent/child relations are id references, never nested ownership.

pub mod board;
pub mod card;
pub mod ids;
pub mod notification;
pub mod validation;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock is set before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
