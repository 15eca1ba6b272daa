//! Request payloads shared between the dashboard and the server

use crate::models::OrderStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One status change request, as used by the bulk driver
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusUpdate {
    pub order_id: String,
    pub status: OrderStatus,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Bulk status change payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkStatusRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub updates: Vec<StatusUpdate>,
}

/// One item of a stock availability pre-flight check
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityItem {
    pub product_id: String,
    pub variation_id: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Stock availability pre-flight payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityRequest {
    #[validate(length(min = 1), nested)]
    pub items: Vec<AvailabilityItem>,
}
