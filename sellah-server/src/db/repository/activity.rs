//! Order Activity Repository
//!
//! Append-only audit trail. Records are immutable once written; there is
//! no update or delete path.

use super::{BaseRepository, RepoResult};
use shared::models::OrderActivity;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ACTIVITY_TABLE: &str = "order_activities";

const ACTIVITY_PROJECTION: &str = "\
    <string>id AS id, \
    store_id, \
    order_id, \
    actor_id, \
    actor_name, \
    kind, \
    old_value, \
    new_value, \
    description, \
    metadata, \
    created_at";

#[derive(Clone)]
pub struct ActivityRepository {
    base: BaseRepository,
}

impl ActivityRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one audit record, letting the store assign the id
    pub async fn append(&self, activity: OrderActivity) -> RepoResult<()> {
        self.base
            .db()
            .query(format!("CREATE {ACTIVITY_TABLE} CONTENT $content RETURN NONE"))
            .bind(("content", activity))
            .await?;
        Ok(())
    }

    /// Activities for one order, newest first
    pub async fn find_by_order(
        &self,
        store_id: &str,
        order_id: &str,
    ) -> RepoResult<Vec<OrderActivity>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ACTIVITY_PROJECTION} FROM {ACTIVITY_TABLE} \
                 WHERE store_id = $store AND order_id = $order \
                 ORDER BY created_at DESC"
            ))
            .bind(("store", store_id.to_string()))
            .bind(("order", order_id.to_string()))
            .await?;
        let activities: Vec<OrderActivity> = result.take(0)?;
        Ok(activities)
    }
}
