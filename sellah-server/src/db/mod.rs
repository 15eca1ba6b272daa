//! Database Module
//!
//! Embedded SurrealDB document store. All durability and per-document
//! transaction semantics are delegated to the engine; this module only
//! opens the handle and selects the namespace.

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

pub const NAMESPACE: &str = "sellah";
pub const DATABASE: &str = "main";

/// Database service — owns the embedded store handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk store under `data_dir`
    pub async fn new(data_dir: &str) -> Result<Self, AppError> {
        let path = format!("{data_dir}/store");
        let db = Surreal::new::<RocksDb>(path.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open store at {path}: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %path, "Document store opened");
        Ok(Self { db })
    }

    /// In-memory store for tests and ephemeral runs
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory store: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::ProductCreate;

    use crate::db::repository::ProductRepository;

    #[tokio::test]
    async fn test_open_on_disk_store_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = DbService::new(dir.path().to_str().unwrap()).await.unwrap();

        let repo = ProductRepository::new(service.db.clone());
        let created = repo
            .create(ProductCreate {
                store_id: "store_1".into(),
                name: "Mug".into(),
                image: None,
                price: Decimal::new(899, 2),
                stock: 12,
                variations: None,
            })
            .await
            .unwrap();

        let id = created.id.expect("created product has an id");
        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.name, "Mug");
        assert_eq!(found.stock, 12);
        assert!(found.created_at <= Utc::now());
    }
}
