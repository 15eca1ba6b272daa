//! Repository Module
//!
//! CRUD access to the document collections. Collection names are part of
//! the external contract: `orders`, `products`, `order_activities`,
//! `notifications`.
//!
//! ID convention: record ids travel through the whole stack as
//! `table:key` strings. Repositories accept either the full string or the
//! bare key and normalize internally.

pub mod activity;
pub mod notification;
pub mod order;
pub mod product;

// Re-exports
pub use activity::ActivityRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Build a `RecordId` from a full `table:key` string or a bare key
pub(crate) fn record_id(table: &str, id: &str) -> RecordId {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    RecordId::from_table_key(table, key)
}

/// Normalize an id to its canonical `table:key` string form
pub(crate) fn canonical_id(table: &str, id: &str) -> String {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    format!("{table}:{key}")
}

/// Generate a fresh record key. Keys start with a letter so ids render as
/// plain `table:key` strings without bracket escaping.
pub(crate) fn new_record_key() -> String {
    format!("r{}", uuid::Uuid::new_v4().simple())
}
