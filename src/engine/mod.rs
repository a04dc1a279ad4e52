//! The order lifecycle and rating aggregation engines.
//!
//! Both operate over an injected database handle and surface errors through
//! [`crate::error::ApiError`]. Notifications are best-effort: a failed insert
//! is logged and never rolls back the primary write.

pub mod orders;
pub mod ratings;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db;

/// Round half-away-from-zero to 2 decimal places (half-up for the
/// non-negative amounts used here). Shared by commission and rating
/// aggregates so repeated recomputations stay deterministic.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Fire-and-forget notification. At-most-once, no retry.
pub(crate) async fn notify(db: &DatabaseConnection, user_id: Uuid, message: String, kind: &str) {
    if let Err(e) =
        db::notifications::insert_notification(db, user_id, message, kind.to_string()).await
    {
        tracing::warn!("failed to queue notification for user {user_id}: {e}");
    }
}
