//! Order Status Coordinator
//!
//! Single entry point for every status change. Validates against the
//! transition table, runs the stock pass for the (from, to) pair, persists
//! the new status, then hands off to the recorder. Nothing else in the
//! codebase writes `status`.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::error::{FlowError, FlowResult};
use super::recorder::ActivityRecorder;
use super::stock::StockLedger;
use crate::db::repository::OrderRepository;
use shared::RequestContext;
use shared::models::{LineItem, Order, OrderStatus, StatusHistoryEntry};
use shared::request::AvailabilityItem;

/// Stock consequence of one (from, to) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockEffect {
    NoChange,
    /// Deduct each line item's quantity (reservation)
    Reserve,
    /// Add each line item's quantity back (compensation)
    Restore,
}

/// Which transitions move stock. Cancelling or rejecting an order that
/// holds a reservation releases it; entering `returned` always restores.
/// Everything else leaves the counters alone.
fn stock_effect(from: OrderStatus, to: OrderStatus) -> StockEffect {
    use OrderStatus::*;
    match (from, to) {
        (Pending, Approved) => StockEffect::Reserve,
        (Approved | Processing, Cancelled | Rejected) => StockEffect::Restore,
        (_, Returned) => StockEffect::Restore,
        _ => StockEffect::NoChange,
    }
}

pub struct OrderStatusCoordinator {
    orders: OrderRepository,
    ledger: StockLedger,
    recorder: ActivityRecorder,
}

impl OrderStatusCoordinator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            ledger: StockLedger::new(db.clone()),
            recorder: ActivityRecorder::new(db),
        }
    }

    /// Move an order to `new_status`
    ///
    /// Fails with `OrderNotFound` for unknown (or foreign-store) ids and
    /// `InvalidTransition` for anything the table forbids, including the
    /// order already sitting at `new_status`. Any stock failure aborts the
    /// call with no status change persisted.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        order_id: &str,
        new_status: OrderStatus,
        reason: Option<String>,
    ) -> FlowResult<Order> {
        let order = self.load_for_store(ctx, order_id).await?;
        let from = order.status;

        if !from.can_transition_to(new_status) {
            return Err(FlowError::InvalidTransition {
                from,
                to: new_status,
            });
        }

        let effect = stock_effect(from, new_status);
        match effect {
            StockEffect::Reserve => self.reserve_stock(&order).await?,
            StockEffect::Restore => self.restore_stock(&order).await?,
            StockEffect::NoChange => {}
        }

        let entry = StatusHistoryEntry {
            status: new_status,
            timestamp: Utc::now(),
            note: reason.clone(),
            updated_by: ctx.actor_id.clone(),
        };
        let updated = match self
            .orders
            .persist_status(order_id, new_status, entry, reason.clone())
            .await
        {
            Ok(order) => order,
            Err(e) => {
                // The reservation must not outlive a failed status write
                if effect == StockEffect::Reserve {
                    self.compensate(&order.items).await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            order_number = %updated.order_number,
            from = %from,
            to = %new_status,
            actor = %ctx.actor_id,
            "Order status updated"
        );

        self.recorder
            .record_status_change(ctx, &updated, from, new_status, reason.as_deref())
            .await;

        Ok(updated)
    }

    /// Set the payment approval flag
    ///
    /// Always permitted regardless of current status; `status` itself is
    /// untouched. The flag is orthogonal to the status machine.
    pub async fn approve_payment(
        &self,
        ctx: &RequestContext,
        order_id: &str,
    ) -> FlowResult<Order> {
        self.load_for_store(ctx, order_id).await?;
        let updated = self.orders.set_approve_payment(order_id, true).await?;
        self.recorder
            .record_payment_update(ctx, &updated, "Payment approved")
            .await;
        Ok(updated)
    }

    /// Set the out-for-delivery flag; same rules as `approve_payment`
    pub async fn mark_out_for_delivery(
        &self,
        ctx: &RequestContext,
        order_id: &str,
    ) -> FlowResult<Order> {
        self.load_for_store(ctx, order_id).await?;
        let updated = self.orders.set_out_of_delivery(order_id, true).await?;
        self.recorder
            .record_shipping_update(ctx, &updated, "Order marked out for delivery")
            .await;
        Ok(updated)
    }

    /// Load an order, treating other stores' orders as not found
    async fn load_for_store(&self, ctx: &RequestContext, order_id: &str) -> FlowResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| FlowError::OrderNotFound(order_id.to_string()))?;
        if order.store_id != ctx.store_id {
            return Err(FlowError::OrderNotFound(order_id.to_string()));
        }
        Ok(order)
    }

    /// Reserve stock for every line item
    ///
    /// Pre-checks availability across all items first, then deducts each
    /// item in its own atomic update. A mid-sequence failure (a race past
    /// the pre-check, or a store error) triggers compensating restorations
    /// for the deductions already applied before the error surfaces.
    async fn reserve_stock(&self, order: &Order) -> FlowResult<()> {
        let items: Vec<AvailabilityItem> = order
            .items
            .iter()
            .map(|item| AvailabilityItem {
                product_id: item.product_id.clone(),
                variation_id: item.variation_id.clone(),
                quantity: i64::from(item.quantity),
            })
            .collect();
        let availability = self.ledger.check_availability(&items).await?;
        if let Some(short) = availability.insufficient.into_iter().next() {
            return Err(FlowError::InsufficientStock {
                product_id: short.product_id,
                variation_id: short.variation_id,
                available: short.available,
                requested: short.requested,
            });
        }

        let mut applied: Vec<LineItem> = Vec::new();
        for item in &order.items {
            match self
                .ledger
                .adjust_stock(
                    &item.product_id,
                    item.variation_id.as_deref(),
                    -i64::from(item.quantity),
                )
                .await
            {
                Ok(remaining) => {
                    tracing::debug!(
                        product_id = %item.product_id,
                        remaining,
                        "Reserved stock for line item"
                    );
                    applied.push(item.clone());
                }
                Err(e) => {
                    self.compensate(&applied).await;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Release every line item's reservation back to stock
    async fn restore_stock(&self, order: &Order) -> FlowResult<()> {
        for item in &order.items {
            self.ledger
                .adjust_stock(
                    &item.product_id,
                    item.variation_id.as_deref(),
                    i64::from(item.quantity),
                )
                .await?;
        }
        Ok(())
    }

    /// Best-effort rollback of deductions applied earlier in this call.
    /// A failed restoration leaves the counter deducted; that is logged
    /// loudly rather than hidden behind a second error.
    async fn compensate(&self, applied: &[LineItem]) {
        for item in applied {
            if let Err(e) = self
                .ledger
                .adjust_stock(
                    &item.product_id,
                    item.variation_id.as_deref(),
                    i64::from(item.quantity),
                )
                .await
            {
                tracing::error!(
                    product_id = %item.product_id,
                    error = %e,
                    "Compensating stock restoration failed, counter left deducted"
                );
            }
        }
    }
}
