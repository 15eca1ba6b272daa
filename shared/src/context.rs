//! Per-call request context
//!
//! The tenant and actor identity is threaded explicitly through every
//! operation instead of living on a shared client singleton. Every
//! coordinator and repository call that acts on behalf of a user takes a
//! `&RequestContext`.

use serde::{Deserialize, Serialize};

/// Identity of the store (tenant) and the acting user for one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Tenant id; every document query is scoped to this store
    pub store_id: String,
    /// Acting user id (staff member or the customer themselves)
    pub actor_id: String,
    /// Display name snapshot for audit records
    pub actor_name: Option<String>,
}

impl RequestContext {
    pub fn new(store_id: impl Into<String>, actor_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            actor_id: actor_id.into(),
            actor_name: None,
        }
    }

    pub fn with_actor_name(mut self, name: impl Into<String>) -> Self {
        self.actor_name = Some(name.into());
        self
    }

    /// Name used in audit records, falling back to the actor id
    pub fn display_name(&self) -> &str {
        self.actor_name.as_deref().unwrap_or(&self.actor_id)
    }
}
