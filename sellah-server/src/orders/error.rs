use crate::db::repository::RepoError;
use shared::models::OrderStatus;
use thiserror::Error;

/// Order lifecycle errors
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Variation {variation_id} not found on product {product_id}")]
    VariationNotFound {
        product_id: String,
        variation_id: String,
    },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error(
        "Insufficient stock for {product_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: String,
        variation_id: Option<String>,
        available: i64,
        requested: i64,
    },

    #[error("Stock adjustment failed: {0}")]
    StockAdjustment(String),

    #[error("Cancelled before execution")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl FlowError {
    /// Transient errors the caller may retry with backoff. Everything else
    /// fails deterministically for the same input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::StockAdjustment(_) | FlowError::Storage(RepoError::Database(_))
        )
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
