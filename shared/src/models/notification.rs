//! Notification Model
//!
//! User-facing notifications created as a side effect of order state
//! changes. Append-only; the receiver may later flip `read` to true and
//! nothing else is ever mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification category shown to the receiving user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    Order,
    Payment,
    System,
    Shipping,
}

/// Notification entity (`notifications` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub store_id: String,
    pub receiver_id: String,
    pub sender_id: String,
    pub title: String,
    pub content: String,
    pub kind: NotificationKind,
    /// Related order, when the notification concerns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
