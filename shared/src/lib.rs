//! Shared types for the Sellah backend
//!
//! Domain models, request payloads and the per-call request context used
//! across the workspace. This crate carries no web or database
//! dependencies so clients and tooling can depend on it directly.

pub mod context;
pub mod models;
pub mod request;

// Re-exports
pub use context::RequestContext;
pub use models::{
    ActivityKind, DeliveryMethod, LineItem, Notification, NotificationKind, Order, OrderActivity,
    OrderCreate, OrderStatus, PaymentStatus, Product, ProductCreate, ShippingAddress,
    StatusHistoryEntry, Variation,
};
pub use request::{AvailabilityItem, AvailabilityRequest, BulkStatusRequest, StatusUpdate};
