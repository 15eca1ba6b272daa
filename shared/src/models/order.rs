//! Order Model
//!
//! Orders are a single aggregate: line items are embedded value objects and
//! never outlive their order. Orders are created `pending` by checkout and
//! mutated exclusively through the order status coordinator afterwards.
//! There is no hard delete path, only the `deleted` flag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Status enums
// =============================================================================

/// Primary lifecycle status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Approved,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
    Rejected,
    Returned,
    Refunded,
}

impl OrderStatus {
    /// Every defined status, for table completeness checks
    pub const ALL: [OrderStatus; 10] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Rejected,
        OrderStatus::Returned,
        OrderStatus::Refunded,
    ];

    /// Statuses reachable from `self` in one step
    ///
    /// This table is the single source of truth for status changes; the
    /// coordinator consults it before any mutation and nothing else writes
    /// `status`. No status is its own successor.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Approved, Rejected, Cancelled],
            Approved => &[Processing, Cancelled],
            Processing => &[Shipped, Cancelled],
            Shipped => &[Delivered, Returned],
            Delivered => &[Completed, Returned],
            Returned => &[Refunded],
            Completed | Cancelled | Rejected | Refunded => &[],
        }
    }

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.allowed_next().contains(&to)
    }

    /// Terminal statuses admit no further transitions
    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Returned => "returned",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state, owned by payment processing; not part of the status machine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Delivery method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    Standard,
    Express,
    Pickup,
}

// =============================================================================
// Order aggregate
// =============================================================================

/// Embedded line item. Quantity is always positive and
/// `line_total == quantity × unit_price`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product reference (String ID)
    pub product_id: String,
    /// Variation reference within the product, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<String>,
    /// Product name snapshot for display
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_name: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl LineItem {
    pub fn computed_line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn is_consistent(&self) -> bool {
        self.quantity > 0 && self.line_total == self.computed_line_total()
    }
}

/// Shipping address snapshot taken at checkout
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShippingAddress {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

/// One entry of the append-only status history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub updated_by: String,
}

/// Order entity (`orders` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tenant reference
    pub store_id: String,
    /// Human-readable order number (generated, not guaranteed globally unique)
    pub order_number: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Payment approval flag, orthogonal to `status`
    #[serde(default)]
    pub approve_payment: bool,
    /// Out-for-delivery flag, orthogonal to `status`
    #[serde(default)]
    pub out_of_delivery: bool,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub tax_amount: Decimal,
    /// Always `subtotal + shipping_fee + tax_amount` at write time
    pub total_amount: Decimal,
    pub currency: String,
    pub shipping_address: ShippingAddress,
    pub delivery_method: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Time-ordered, append-only; every entry is a historical value of `status`
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    /// Soft delete marker; orders are never physically removed
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Whether the monetary totals balance (`total == subtotal + shipping + tax`)
    pub fn totals_balance(&self) -> bool {
        self.total_amount == self.subtotal + self.shipping_fee + self.tax_amount
    }
}

/// Create order payload. Checkout is external to this core; this payload
/// exists for seed tooling and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub store_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub tax_amount: Decimal,
    pub currency: String,
    pub shipping_address: ShippingAddress,
    pub delivery_method: DeliveryMethod,
    pub notes: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_transition_table_matches_spec() {
        use OrderStatus::*;
        assert_eq!(Pending.allowed_next(), &[Approved, Rejected, Cancelled]);
        assert_eq!(Approved.allowed_next(), &[Processing, Cancelled]);
        assert_eq!(Processing.allowed_next(), &[Shipped, Cancelled]);
        assert_eq!(Shipped.allowed_next(), &[Delivered, Returned]);
        assert_eq!(Delivered.allowed_next(), &[Completed, Returned]);
        assert_eq!(Returned.allowed_next(), &[Refunded]);
    }

    #[test]
    fn test_terminal_statuses_reject_everything() {
        use OrderStatus::*;
        for terminal in [Completed, Cancelled, Rejected, Refunded] {
            assert!(terminal.is_terminal());
            for target in OrderStatus::ALL {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_no_status_is_its_own_successor() {
        for status in OrderStatus::ALL {
            assert!(
                !status.can_transition_to(status),
                "{status} must not transition to itself"
            );
        }
    }

    #[test]
    fn test_every_status_has_a_table_entry() {
        // Exhaustive match in allowed_next guarantees this at compile time;
        // keep a runtime sweep so ALL stays in sync with the enum.
        for status in OrderStatus::ALL {
            let _ = status.allowed_next();
            assert!(!status.as_str().is_empty());
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let shipped: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(shipped, OrderStatus::Shipped);
        assert!(serde_json::from_str::<OrderStatus>("\"unknown\"").is_err());
    }

    #[test]
    fn test_line_item_consistency() {
        let item = LineItem {
            product_id: "products:p1".into(),
            variation_id: None,
            product_name: "Tee".into(),
            variation_name: None,
            quantity: 3,
            unit_price: Decimal::new(1250, 2),
            line_total: Decimal::new(3750, 2),
        };
        assert!(item.is_consistent());

        let broken = LineItem {
            line_total: Decimal::new(1, 2),
            ..item
        };
        assert!(!broken.is_consistent());
    }
}
