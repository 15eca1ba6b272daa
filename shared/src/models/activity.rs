//! Order Activity Model
//!
//! Append-only audit trail: one record per state change on an order,
//! immutable once written, displayed newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of change an activity records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    StatusChange,
    PaymentUpdate,
    ShippingUpdate,
    Note,
    OrderUpdated,
}

/// Activity entity (`order_activities` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub store_id: String,
    /// Order reference (String ID)
    pub order_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub kind: ActivityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
