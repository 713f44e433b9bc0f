//! Database repository for the activity/audit log.

use crate::database::models::ActivityEntry;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for activity-log database operations.
pub struct ActivityRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> ActivityRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends an entry to the activity log.
    pub async fn create_entry(
        &self,
        actor_name: &str,
        actor_email: &str,
        action: &str,
        payload: &str,
        note: Option<&str>,
    ) -> Result<ActivityEntry> {
        let entry = ActivityEntry {
            id: Uuid::now_v7().to_string(),
            actor_name: actor_name.to_string(),
            actor_email: actor_email.to_string(),
            action: action.to_string(),
            payload: payload.to_string(),
            note: note.map(|n| n.to_string()),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO activity_log (id, actor_name, actor_email, action, payload, note, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.actor_name)
        .bind(&entry.actor_email)
        .bind(&entry.action)
        .bind(&entry.payload)
        .bind(&entry.note)
        .bind(entry.created_at)
        .execute(self.pool)
        .await?;

        Ok(entry)
    }

    /// Retrieves activity entries, newest first.
    pub async fn list_entries(&self, limit: u64, offset: u64) -> Result<Vec<ActivityEntry>> {
        let entries = sqlx::query_as::<_, ActivityEntry>(
            "SELECT * FROM activity_log ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Total number of activity entries.
    pub async fn count_entries(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activity_log")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }
}
