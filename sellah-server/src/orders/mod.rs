//! Order Lifecycle Engine
//!
//! The only component allowed to change an order's `status`. One
//! `update_status` call runs through a fixed sequence:
//!
//! ```text
//! update_status(ctx, order_id, new_status, reason)
//!     ├─ 1. Load order (store-scoped), reject unknown ids
//!     ├─ 2. Check the transition table
//!     ├─ 3. Stock pass selected by (from, to):
//!     │      reserve on pending→approved,
//!     │      restore on cancellation after reservation and on returns
//!     ├─ 4. Persist status + history entry + updated_at
//!     └─ 5. Record activity, notify the customer (best effort)
//! ```
//!
//! Stock strictly precedes status, status strictly precedes audit. The
//! three effects are not atomic as a group: a reader can observe updated
//! stock before the updated status. Multi-item reservations are a saga
//! (per-item atomic deductions with explicit compensating restorations on
//! failure), not a cross-document transaction.

mod batch;
mod coordinator;
mod error;
mod recorder;
mod stock;

pub use batch::{BulkFailure, BulkOutcome};
pub use coordinator::OrderStatusCoordinator;
pub use error::{FlowError, FlowResult};
pub use recorder::ActivityRecorder;
pub use stock::{InsufficientItem, StockAvailability, StockLedger};

#[cfg(test)]
mod tests;
