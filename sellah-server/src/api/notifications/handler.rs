//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::context::StoreContext;
use crate::core::ServerState;
use crate::db::repository::NotificationRepository;
use crate::utils::{AppError, AppResult};
use shared::models::Notification;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Notifications addressed to the calling actor, newest first
pub async fn list(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let repo = NotificationRepository::new(state.db.clone());
    let notifications = repo
        .find_by_receiver(&ctx.store_id, &ctx.actor_id, query.limit.clamp(1, 200))
        .await?;
    Ok(Json(notifications))
}

/// Mark one of the caller's notifications as read
pub async fn mark_read(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let repo = NotificationRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|n| n.store_id == ctx.store_id && n.receiver_id == ctx.actor_id)
        .ok_or_else(|| AppError::not_found(format!("Notification {} not found", id)))?;

    let notification = repo.mark_read(&id).await?;
    Ok(Json(notification))
}
