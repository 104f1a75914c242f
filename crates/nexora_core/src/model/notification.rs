//! In-app notification record.

use crate::model::ids::NotificationId;
use serde::{Deserialize, Serialize};

/// Read/unread message produced by application events.
///
/// Not owned by any project; lives in its own top-level collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub read: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Notification {
    /// Creates an unread notification.
    pub fn new(message: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            read: false,
            created_at,
        }
    }
}
