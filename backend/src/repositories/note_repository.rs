//! Database repository for resource notes.
//!
//! Notes are free-text annotations keyed by the external commerce resource
//! id; one note per resource.

use crate::database::models::Note;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct NoteRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> NoteRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Retrieves the note attached to a commerce resource, if any.
    pub async fn get_by_target_id(&self, target_id: &str) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE target_id = ?")
            .bind(target_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(note)
    }

    /// Creates or replaces the note for a commerce resource.
    pub async fn upsert(&self, target_id: &str, user_note: &str) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO notes (id, target_id, user_note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (target_id)
            DO UPDATE SET user_note = excluded.user_note, updated_at = excluded.updated_at
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(target_id)
        .bind(user_note)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
