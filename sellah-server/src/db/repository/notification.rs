//! Notification Repository
//!
//! Append-only; the only mutation ever applied is the receiver flipping
//! `read` to true.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use shared::models::Notification;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const NOTIFICATION_TABLE: &str = "notifications";

const NOTIFICATION_PROJECTION: &str = "\
    <string>id AS id, \
    store_id, \
    receiver_id, \
    sender_id, \
    title, \
    content, \
    kind, \
    order_id, \
    read, \
    metadata, \
    created_at";

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one notification, letting the store assign the id
    pub async fn append(&self, notification: Notification) -> RepoResult<()> {
        self.base
            .db()
            .query(format!(
                "CREATE {NOTIFICATION_TABLE} CONTENT $content RETURN NONE"
            ))
            .bind(("content", notification))
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Notification>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {NOTIFICATION_PROJECTION} FROM {NOTIFICATION_TABLE} WHERE id = $id"
            ))
            .bind(("id", record_id(NOTIFICATION_TABLE, id)))
            .await?;
        let notifications: Vec<Notification> = result.take(0)?;
        Ok(notifications.into_iter().next())
    }

    /// Notifications for one receiver, newest first
    pub async fn find_by_receiver(
        &self,
        store_id: &str,
        receiver_id: &str,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {NOTIFICATION_PROJECTION} FROM {NOTIFICATION_TABLE} \
                 WHERE store_id = $store AND receiver_id = $receiver \
                 ORDER BY created_at DESC LIMIT $limit"
            ))
            .bind(("store", store_id.to_string()))
            .bind(("receiver", receiver_id.to_string()))
            .bind(("limit", limit))
            .await?;
        let notifications: Vec<Notification> = result.take(0)?;
        Ok(notifications)
    }

    /// Flip the read flag to true
    pub async fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        self.base
            .db()
            .query("UPDATE $id SET read = true RETURN NONE")
            .bind(("id", record_id(NOTIFICATION_TABLE, id)))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }
}
