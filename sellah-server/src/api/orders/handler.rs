//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::api::context::StoreContext;
use crate::core::ServerState;
use crate::db::repository::{ActivityRepository, OrderRepository};
use crate::orders::{BulkOutcome, OrderStatusCoordinator};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{Order, OrderActivity, OrderStatus};
use shared::request::BulkStatusRequest;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// List the store's orders (paginated, newest first)
pub async fn list(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all(&ctx.store_id, query.limit.clamp(1, 200), query.offset.max(0))
        .await?;
    Ok(Json(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .filter(|order| order.store_id == ctx.store_id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// Status change payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Move an order to a new status
pub async fn update_status(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let coordinator = OrderStatusCoordinator::new(state.db.clone());
    let order = coordinator
        .update_status(&ctx, &id, payload.status, payload.reason)
        .await?;
    Ok(Json(order))
}

/// Apply many status updates, best effort
pub async fn bulk_update_status(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Json(payload): Json<BulkStatusRequest>,
) -> AppResult<Json<BulkOutcome>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let coordinator = OrderStatusCoordinator::new(state.db.clone());
    let outcome = coordinator.apply_bulk(&ctx, &payload.updates, None).await;
    Ok(Json(outcome))
}

/// Approve payment (flag only, status untouched)
pub async fn approve_payment(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let coordinator = OrderStatusCoordinator::new(state.db.clone());
    let order = coordinator.approve_payment(&ctx, &id).await?;
    Ok(Json(order))
}

/// Mark out for delivery (flag only, status untouched)
pub async fn mark_out_for_delivery(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let coordinator = OrderStatusCoordinator::new(state.db.clone());
    let order = coordinator.mark_out_for_delivery(&ctx, &id).await?;
    Ok(Json(order))
}

/// Audit trail for one order, newest first
pub async fn get_activities(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<OrderActivity>>> {
    let repo = ActivityRepository::new(state.db.clone());
    let activities = repo
        .find_by_order(&ctx.store_id, &OrderRepository::canonical(&id))
        .await?;
    Ok(Json(activities))
}

/// Soft delete an order
pub async fn soft_delete(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|order| order.store_id == ctx.store_id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    repo.soft_delete(&id).await?;
    Ok(ok(()))
}
