//! Bulk status driver
//!
//! Best-effort batch: items run sequentially and independently, a failing
//! item is recorded and its siblings continue. The whole batch never
//! throws.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::coordinator::OrderStatusCoordinator;
use super::error::FlowError;
use shared::RequestContext;
use shared::request::StatusUpdate;

/// One failed batch item
#[derive(Debug, Clone, Serialize)]
pub struct BulkFailure {
    pub order_id: String,
    pub error: String,
}

/// Per-item results of one batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkOutcome {
    pub success: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl OrderStatusCoordinator {
    /// Apply a list of status updates, collecting per-item outcomes
    ///
    /// The cancellation token is checked between items; once cancelled,
    /// the remaining items are marked failed without being attempted.
    pub async fn apply_bulk(
        &self,
        ctx: &RequestContext,
        updates: &[StatusUpdate],
        cancel: Option<&CancellationToken>,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();

        for update in updates {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                outcome.failed.push(BulkFailure {
                    order_id: update.order_id.clone(),
                    error: FlowError::Cancelled.to_string(),
                });
                continue;
            }

            match self
                .update_status(ctx, &update.order_id, update.status, update.reason.clone())
                .await
            {
                Ok(_) => outcome.success.push(update.order_id.clone()),
                Err(e) => {
                    tracing::warn!(
                        order_id = %update.order_id,
                        error = %e,
                        "Bulk status update item failed"
                    );
                    outcome.failed.push(BulkFailure {
                        order_id: update.order_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            total = updates.len(),
            succeeded = outcome.success.len(),
            failed = outcome.failed.len(),
            "Bulk status update finished"
        );
        outcome
    }
}
