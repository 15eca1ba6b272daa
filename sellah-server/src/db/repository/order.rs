//! Order Repository
//!
//! Orders are a single aggregate with embedded line items. The `status`
//! field is only ever written through the order status coordinator; this
//! repository exposes the raw persistence operations it uses.

use super::{BaseRepository, RepoError, RepoResult, canonical_id, new_record_key, record_id};
use chrono::{DateTime, Utc};
use shared::models::{Order, OrderCreate, OrderStatus, PaymentStatus, StatusHistoryEntry};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "orders";

/// Explicit projection so record ids come back as plain strings
const ORDER_PROJECTION: &str = "\
    <string>id AS id, \
    store_id, \
    order_number, \
    customer_id, \
    customer_name, \
    status, \
    payment_status, \
    approve_payment, \
    out_of_delivery, \
    items, \
    subtotal, \
    shipping_fee, \
    tax_amount, \
    total_amount, \
    currency, \
    shipping_address, \
    delivery_method, \
    tracking_number, \
    notes, \
    status_history, \
    deleted, \
    created_at, \
    updated_at";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order in `pending` status
    ///
    /// Checkout is external to this core; creation exists for seed tooling
    /// and tests. Line-item and total invariants are validated at write
    /// time, not re-verified on read.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        for item in &data.items {
            if !item.is_consistent() {
                return Err(RepoError::Validation(format!(
                    "Line item for {} has quantity {} and line_total {}",
                    item.product_id, item.quantity, item.line_total
                )));
            }
        }

        let now = Utc::now();
        let order = Order {
            id: None,
            store_id: data.store_id,
            order_number: self.next_order_number(&now).await?,
            customer_id: data.customer_id,
            customer_name: data.customer_name,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            approve_payment: false,
            out_of_delivery: false,
            items: data.items,
            subtotal: data.subtotal,
            shipping_fee: data.shipping_fee,
            tax_amount: data.tax_amount,
            total_amount: data.subtotal + data.shipping_fee + data.tax_amount,
            currency: data.currency,
            shipping_address: data.shipping_address,
            delivery_method: data.delivery_method,
            tracking_number: None,
            notes: data.notes,
            status_history: vec![StatusHistoryEntry {
                status: OrderStatus::Pending,
                timestamp: now,
                note: None,
                updated_by: "checkout".to_string(),
            }],
            deleted: false,
            created_at: now,
            updated_at: now,
        };

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($table, $key) CONTENT $content RETURN NONE")
            .bind(("table", ORDER_TABLE))
            .bind(("key", key.clone()))
            .bind(("content", order))
            .await?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find an order by id; soft-deleted orders are invisible
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_PROJECTION} FROM orders WHERE id = $id AND deleted = false"
            ))
            .bind(("id", record_id(ORDER_TABLE, id)))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// List a store's orders, newest first
    pub async fn find_all(&self, store_id: &str, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_PROJECTION} FROM orders \
                 WHERE store_id = $store AND deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $offset"
            ))
            .bind(("store", store_id.to_string()))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Persist a status change: new status, one history entry, fresh
    /// `updated_at`, optional notes
    pub async fn persist_status(
        &self,
        id: &str,
        status: OrderStatus,
        entry: StatusHistoryEntry,
        notes: Option<String>,
    ) -> RepoResult<Order> {
        let mut query_str = String::from(
            "UPDATE $id SET status = $status, updated_at = $now, status_history += $entry",
        );
        if notes.is_some() {
            query_str.push_str(", notes = $notes");
        }
        query_str.push_str(" RETURN NONE");

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("id", record_id(ORDER_TABLE, id)))
            .bind(("status", status))
            .bind(("now", Utc::now()))
            .bind(("entry", entry));
        if let Some(notes) = notes {
            query = query.bind(("notes", notes));
        }
        query.await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Set the payment approval flag without touching `status`
    pub async fn set_approve_payment(&self, id: &str, value: bool) -> RepoResult<Order> {
        self.set_flag(id, "approve_payment", value).await
    }

    /// Set the out-for-delivery flag without touching `status`
    pub async fn set_out_of_delivery(&self, id: &str, value: bool) -> RepoResult<Order> {
        self.set_flag(id, "out_of_delivery", value).await
    }

    async fn set_flag(&self, id: &str, field: &'static str, value: bool) -> RepoResult<Order> {
        self.base
            .db()
            .query(format!(
                "UPDATE $id SET {field} = $value, updated_at = $now RETURN NONE"
            ))
            .bind(("id", record_id(ORDER_TABLE, id)))
            .bind(("value", value))
            .bind(("now", Utc::now()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Soft delete; orders are never physically removed
    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        // Confirm the order is visible before flagging it
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $id SET deleted = true, updated_at = $now RETURN NONE")
            .bind(("id", record_id(ORDER_TABLE, id)))
            .bind(("now", Utc::now()))
            .await?;
        Ok(())
    }

    /// Canonical `orders:key` string for cross-collection references
    pub fn canonical(id: &str) -> String {
        canonical_id(ORDER_TABLE, id)
    }

    /// Generate the next human-readable order number
    ///
    /// Sequence-per-day from a collection count; readable, not guaranteed
    /// globally unique.
    async fn next_order_number(&self, now: &DateTime<Utc>) -> RepoResult<String> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            total: i64,
        }
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM orders GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        let next = rows.first().map(|r| r.total).unwrap_or(0) + 1;
        Ok(format!("SO{}{:05}", now.format("%Y%m%d"), next))
    }
}
