//! HTTP API
//!
//! One router per resource, composed here. Tenant and actor identity is
//! extracted per request by [`context::StoreContext`].

pub mod context;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;

use axum::Router;

use crate::core::ServerState;

/// Compose all resource routers into the application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(notifications::router())
        .with_state(state)
}
