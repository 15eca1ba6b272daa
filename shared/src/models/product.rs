//! Product Model
//!
//! The stock counter lives on the product document, or on a variation
//! nested inside it. Counters are mutated only through the stock ledger's
//! guarded updates and must never go negative.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product variation with its own stock counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variation {
    /// Variation id, unique within the owning product
    pub id: String,
    pub name: String,
    /// Price override; the product price applies when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub stock: i64,
}

/// Product entity (`products` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tenant reference
    pub store_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: Decimal,
    /// Product-level stock counter, used when the product has no variations
    pub stock: i64,
    #[serde(default)]
    pub variations: Vec<Variation>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn variation(&self, variation_id: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == variation_id)
    }

    /// Current counter for the product or one of its variations
    pub fn stock_for(&self, variation_id: Option<&str>) -> Option<i64> {
        match variation_id {
            Some(vid) => self.variation(vid).map(|v| v.stock),
            None => Some(self.stock),
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub store_id: String,
    pub name: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    pub variations: Option<Vec<Variation>>,
}
