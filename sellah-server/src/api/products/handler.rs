//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::context::StoreContext;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::orders::{StockAvailability, StockLedger};
use crate::utils::{AppError, AppResult};
use shared::models::Product;
use shared::request::AvailabilityRequest;

/// List the store's active products
pub async fn list(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all(&ctx.store_id).await?;
    Ok(Json(products))
}

/// Get product by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    StoreContext(ctx): StoreContext,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .filter(|product| product.store_id == ctx.store_id)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// Pre-flight stock check before attempting a reservation
///
/// Advisory: a reservation issued right after can still fail if a
/// concurrent one wins the race.
pub async fn check_availability(
    State(state): State<ServerState>,
    StoreContext(_ctx): StoreContext,
    Json(payload): Json<AvailabilityRequest>,
) -> AppResult<Json<StockAvailability>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let ledger = StockLedger::new(state.db.clone());
    let availability = ledger.check_availability(&payload.items).await?;
    Ok(Json(availability))
}
