//! Activity / Notification Recorder
//!
//! Secondary audit-and-notify path. Every write here is best effort: the
//! primary status/stock change has already committed, so failures are
//! logged and swallowed instead of being reported as operation failure.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{ActivityRepository, NotificationRepository};
use shared::RequestContext;
use shared::models::{
    ActivityKind, Notification, NotificationKind, Order, OrderActivity, OrderStatus,
};

/// Customer-facing message per status, with a generic fallback for
/// anything unlisted
fn status_message(status: OrderStatus) -> Option<&'static str> {
    use OrderStatus::*;
    match status {
        Approved => Some("Your order has been approved and will be processed shortly."),
        Processing => Some("Your order is being prepared."),
        Shipped => Some("Your order has been shipped and is on its way."),
        Delivered => Some("Your order has been delivered."),
        Completed => Some("Your order is complete. Thank you for shopping with us!"),
        Cancelled => Some("Your order has been cancelled."),
        Rejected => Some("Your order could not be accepted."),
        Returned => Some("Your order return has been registered."),
        Refunded => Some("Your order has been refunded."),
        Pending => None,
    }
}

#[derive(Clone)]
pub struct ActivityRecorder {
    activities: ActivityRepository,
    notifications: NotificationRepository,
}

impl ActivityRecorder {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            activities: ActivityRepository::new(db.clone()),
            notifications: NotificationRepository::new(db),
        }
    }

    /// One audit record per status change, plus a customer notification
    /// when someone other than the customer made the change
    pub async fn record_status_change(
        &self,
        ctx: &RequestContext,
        order: &Order,
        old_status: OrderStatus,
        new_status: OrderStatus,
        reason: Option<&str>,
    ) {
        let description = format!("Status changed from {old_status} to {new_status}");
        self.append_activity(
            ctx,
            order,
            ActivityKind::StatusChange,
            Some(old_status.to_string()),
            Some(new_status.to_string()),
            description,
            reason,
        )
        .await;

        if order.customer_id != ctx.actor_id {
            let content = status_message(new_status)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("Your order status has been updated to {new_status}.")
                });
            self.append_notification(ctx, order, NotificationKind::Order, content)
                .await;
        }
    }

    /// Audit a payment flag change (kind `payment_update`)
    pub async fn record_payment_update(
        &self,
        ctx: &RequestContext,
        order: &Order,
        description: &str,
    ) {
        self.append_activity(
            ctx,
            order,
            ActivityKind::PaymentUpdate,
            None,
            None,
            description.to_string(),
            None,
        )
        .await;

        if order.customer_id != ctx.actor_id {
            self.append_notification(
                ctx,
                order,
                NotificationKind::Payment,
                format!("{description} for order {}.", order.order_number),
            )
            .await;
        }
    }

    /// Audit a shipping flag change (kind `shipping_update`)
    pub async fn record_shipping_update(
        &self,
        ctx: &RequestContext,
        order: &Order,
        description: &str,
    ) {
        self.append_activity(
            ctx,
            order,
            ActivityKind::ShippingUpdate,
            None,
            None,
            description.to_string(),
            None,
        )
        .await;

        if order.customer_id != ctx.actor_id {
            self.append_notification(
                ctx,
                order,
                NotificationKind::Shipping,
                format!("{description} for order {}.", order.order_number),
            )
            .await;
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn append_activity(
        &self,
        ctx: &RequestContext,
        order: &Order,
        kind: ActivityKind,
        old_value: Option<String>,
        new_value: Option<String>,
        description: String,
        reason: Option<&str>,
    ) {
        let activity = OrderActivity {
            id: None,
            store_id: ctx.store_id.clone(),
            order_id: order.id.clone().unwrap_or_default(),
            actor_id: ctx.actor_id.clone(),
            actor_name: ctx.display_name().to_string(),
            kind,
            old_value,
            new_value,
            description,
            metadata: reason.map(|r| serde_json::json!({ "reason": r })),
            created_at: Utc::now(),
        };
        if let Err(e) = self.activities.append(activity).await {
            tracing::warn!(
                order_id = %order.order_number,
                error = %e,
                "Activity write failed, audit entry dropped"
            );
        }
    }

    async fn append_notification(
        &self,
        ctx: &RequestContext,
        order: &Order,
        kind: NotificationKind,
        content: String,
    ) {
        let notification = Notification {
            id: None,
            store_id: ctx.store_id.clone(),
            receiver_id: order.customer_id.clone(),
            sender_id: ctx.actor_id.clone(),
            title: format!("Order {}", order.order_number),
            content,
            kind,
            order_id: order.id.clone(),
            read: false,
            metadata: None,
            created_at: Utc::now(),
        };
        if let Err(e) = self.notifications.append(notification).await {
            tracing::warn!(
                order_id = %order.order_number,
                error = %e,
                "Notification write failed, customer will not be notified"
            );
        }
    }
}
