//! Shared server state
//!
//! One `Surreal<Db>` handle is shared by every handler; repositories and
//! the coordinator are cheap to construct per call from a clone of it.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// State handed to every axum handler
#[derive(Clone)]
pub struct ServerState {
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Open the document store and build the shared state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let service = DbService::new(&config.data_dir).await?;
        Ok(Self { db: service.db })
    }

    /// State backed by an in-memory store, for tests and ephemeral runs
    pub async fn in_memory() -> Result<Self, AppError> {
        let service = DbService::memory().await?;
        Ok(Self { db: service.db })
    }
}
