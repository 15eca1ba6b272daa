//! Product Repository
//!
//! Stock counters live on the product document (or a nested variation) and
//! are only mutated through the guarded updates below. Each update is a
//! single statement, so the engine's per-document atomicity applies.

use super::{BaseRepository, RepoError, RepoResult, new_record_key, record_id};
use chrono::Utc;
use shared::models::{Product, ProductCreate, Variation};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "products";

const PRODUCT_PROJECTION: &str = "\
    <string>id AS id, \
    store_id, \
    name, \
    image, \
    price, \
    stock, \
    variations, \
    is_active, \
    created_at, \
    updated_at";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.stock < 0 {
            return Err(RepoError::Validation("stock cannot be negative".into()));
        }
        let variations = data.variations.unwrap_or_default();
        if variations.iter().any(|v| v.stock < 0) {
            return Err(RepoError::Validation(
                "variation stock cannot be negative".into(),
            ));
        }

        let now = Utc::now();
        let product = Product {
            id: None,
            store_id: data.store_id,
            name: data.name,
            image: data.image,
            price: data.price,
            stock: data.stock,
            variations,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($table, $key) CONTENT $content RETURN NONE")
            .bind(("table", PRODUCT_TABLE))
            .bind(("key", key.clone()))
            .bind(("content", product))
            .await?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_PROJECTION} FROM products WHERE id = $id"
            ))
            .bind(("id", record_id(PRODUCT_TABLE, id)))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// List a store's active products
    pub async fn find_all(&self, store_id: &str) -> RepoResult<Vec<Product>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_PROJECTION} FROM products \
                 WHERE store_id = $store AND is_active = true ORDER BY name"
            ))
            .bind(("store", store_id.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products)
    }

    /// Guarded product-level stock adjustment
    ///
    /// One atomic statement: the counter moves only if it stays
    /// non-negative. Returns the post-adjustment quantity, or `None` when
    /// the guard rejected the write: missing record or insufficient stock,
    /// which the caller classifies by re-reading.
    pub async fn try_adjust_stock(&self, id: &str, delta: i64) -> RepoResult<Option<i64>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET stock += $delta, updated_at = $now \
                 WHERE stock + $delta >= 0 RETURN VALUE stock",
            )
            .bind(("id", record_id(PRODUCT_TABLE, id)))
            .bind(("delta", delta))
            .bind(("now", Utc::now()))
            .await?;
        let stocks: Vec<i64> = result.take(0)?;
        Ok(stocks.into_iter().next())
    }

    /// Compare-and-set adjustment of one variation's counter
    ///
    /// The write only lands if the counter still holds `expected`, which
    /// makes the read-validate-write sequence in the stock ledger safe
    /// under concurrent adjustments. Returns the new quantity, or `None`
    /// on a CAS miss.
    pub async fn try_adjust_variation_stock(
        &self,
        id: &str,
        index: usize,
        expected: i64,
        delta: i64,
    ) -> RepoResult<Option<i64>> {
        #[derive(serde::Deserialize)]
        struct VariationsRow {
            variations: Vec<Variation>,
        }

        let mut result = self
            .base
            .db()
            .query(format!(
                "UPDATE $id SET variations[{index}].stock += $delta, updated_at = $now \
                 WHERE variations[{index}].stock = $expected RETURN AFTER"
            ))
            .bind(("id", record_id(PRODUCT_TABLE, id)))
            .bind(("delta", delta))
            .bind(("expected", expected))
            .bind(("now", Utc::now()))
            .await?;
        let rows: Vec<VariationsRow> = result.take(0)?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.variations.into_iter().nth(index))
            .map(|v| v.stock))
    }
}
