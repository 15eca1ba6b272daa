//! Store context extraction
//!
//! Tenant and actor identity arrive as headers set by the dashboard's
//! gateway after authentication (which is external to this service). The
//! context is an explicit value passed into every coordinator call, never
//! ambient state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::utils::AppError;
use shared::RequestContext;

pub const STORE_ID_HEADER: &str = "x-store-id";
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";

/// Extracts the per-call [`RequestContext`] from request headers
#[derive(Debug, Clone)]
pub struct StoreContext(pub RequestContext);

impl<S> FromRequestParts<S> for StoreContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let store_id = required_header(parts, STORE_ID_HEADER)?;
        let actor_id = required_header(parts, ACTOR_ID_HEADER)?;

        let mut ctx = RequestContext::new(store_id, actor_id);
        if let Some(name) = parts
            .headers
            .get(ACTOR_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
        {
            ctx = ctx.with_actor_name(name);
        }

        Ok(StoreContext(ctx))
    }
}

fn required_header(parts: &Parts, name: &str) -> Result<String, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(format!("Missing required header: {name}")))
}
