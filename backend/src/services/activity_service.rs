//! Activity/audit log recording.
//!
//! Audit writes are side effects of successful mutations: the primary
//! response has already been decided when they run, so a failed write is
//! logged and swallowed rather than surfaced to the client.

use crate::repositories::activity_repository::ActivityRepository;
use serde_json::Value;
use sqlx::SqlitePool;

pub struct ActivityService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> ActivityService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Records an audit entry for a mutation. Never fails the caller.
    pub async fn record(
        &self,
        actor_name: &str,
        actor_email: &str,
        action: &str,
        payload: Value,
        note: Option<&str>,
    ) {
        let repo = ActivityRepository::new(self.pool);
        let payload = payload.to_string();

        if let Err(e) = repo
            .create_entry(actor_name, actor_email, action, &payload, note)
            .await
        {
            tracing::warn!("Failed to record activity entry '{}': {}", action, e);
        }
    }
}
