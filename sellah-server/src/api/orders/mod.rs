//! Order API Module
//!
//! Read access plus the status-change surface. Every mutation goes through
//! the order status coordinator.

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/bulk-status", post(handler::bulk_update_status))
        .route("/{id}", get(handler::get_by_id).delete(handler::soft_delete))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/approve-payment", post(handler::approve_payment))
        .route("/{id}/out-for-delivery", post(handler::mark_out_for_delivery))
        .route("/{id}/activities", get(handler::get_activities))
}
