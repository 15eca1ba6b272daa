//! Stock Ledger
//!
//! All counter mutations go through `adjust_stock`: one guarded statement
//! per product document, so concurrent reservations against the same
//! product cannot both succeed past available stock. Cross-product
//! coordination is the coordinator's saga, not this ledger's concern.

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::error::{FlowError, FlowResult};
use crate::db::repository::ProductRepository;
use shared::request::AvailabilityItem;

/// Attempts before a contended variation CAS gives up
const CAS_MAX_ATTEMPTS: usize = 3;

/// One short item in an availability report
#[derive(Debug, Clone, Serialize)]
pub struct InsufficientItem {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<String>,
    pub available: i64,
    pub requested: i64,
}

/// Result of a non-transactional availability pre-flight
#[derive(Debug, Clone, Serialize)]
pub struct StockAvailability {
    pub available: bool,
    pub insufficient: Vec<InsufficientItem>,
}

#[derive(Clone)]
pub struct StockLedger {
    products: ProductRepository,
}

impl StockLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    /// Adjust one counter; negative delta deducts, positive restores.
    ///
    /// Deduction fails with `InsufficientStock` rather than driving the
    /// counter negative, and the stored value is untouched on failure.
    /// Restoration is uncapped. Returns the post-adjustment quantity.
    pub async fn adjust_stock(
        &self,
        product_id: &str,
        variation_id: Option<&str>,
        delta: i64,
    ) -> FlowResult<i64> {
        match variation_id {
            None => self.adjust_product(product_id, delta).await,
            Some(vid) => self.adjust_variation(product_id, vid, delta).await,
        }
    }

    async fn adjust_product(&self, product_id: &str, delta: i64) -> FlowResult<i64> {
        if let Some(new_stock) = self.products.try_adjust_stock(product_id, delta).await? {
            return Ok(new_stock);
        }

        // Guard miss: classify by re-reading, without writing
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| FlowError::ProductNotFound(product_id.to_string()))?;
        Err(FlowError::InsufficientStock {
            product_id: product_id.to_string(),
            variation_id: None,
            available: product.stock,
            requested: -delta,
        })
    }

    async fn adjust_variation(
        &self,
        product_id: &str,
        variation_id: &str,
        delta: i64,
    ) -> FlowResult<i64> {
        for attempt in 1..=CAS_MAX_ATTEMPTS {
            let product = self
                .products
                .find_by_id(product_id)
                .await?
                .ok_or_else(|| FlowError::ProductNotFound(product_id.to_string()))?;
            let index = product
                .variations
                .iter()
                .position(|v| v.id == variation_id)
                .ok_or_else(|| FlowError::VariationNotFound {
                    product_id: product_id.to_string(),
                    variation_id: variation_id.to_string(),
                })?;
            let current = product.variations[index].stock;

            if current + delta < 0 {
                return Err(FlowError::InsufficientStock {
                    product_id: product_id.to_string(),
                    variation_id: Some(variation_id.to_string()),
                    available: current,
                    requested: -delta,
                });
            }

            if let Some(new_stock) = self
                .products
                .try_adjust_variation_stock(product_id, index, current, delta)
                .await?
            {
                return Ok(new_stock);
            }

            tracing::debug!(
                product_id = %product_id,
                variation_id = %variation_id,
                attempt,
                "Variation stock CAS miss, retrying"
            );
        }

        Err(FlowError::StockAdjustment(format!(
            "Contention adjusting stock for {product_id}/{variation_id} after {CAS_MAX_ATTEMPTS} attempts"
        )))
    }

    /// Non-transactional read of every referenced counter
    ///
    /// Advisory only: a later `adjust_stock` can still fail if concurrent
    /// reservations race between the check and the deduction.
    pub async fn check_availability(
        &self,
        items: &[AvailabilityItem],
    ) -> FlowResult<StockAvailability> {
        let mut insufficient = Vec::new();
        for item in items {
            let product = self
                .products
                .find_by_id(&item.product_id)
                .await?
                .ok_or_else(|| FlowError::ProductNotFound(item.product_id.clone()))?;
            let available = product
                .stock_for(item.variation_id.as_deref())
                .ok_or_else(|| FlowError::VariationNotFound {
                    product_id: item.product_id.clone(),
                    variation_id: item.variation_id.clone().unwrap_or_default(),
                })?;
            if available < item.quantity {
                insufficient.push(InsufficientItem {
                    product_id: item.product_id.clone(),
                    variation_id: item.variation_id.clone(),
                    available,
                    requested: item.quantity,
                });
            }
        }
        Ok(StockAvailability {
            available: insufficient.is_empty(),
            insufficient,
        })
    }
}
