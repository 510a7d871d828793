//! # Postgres thread store
//!
//! Each thread is one JSONB document. `board`, `created_on`, `bumped_on` and
//! `version` are lifted into columns so the listing can be sorted by the
//! database and the save can be made conditional on the version.

use async_trait::async_trait;
use domains::{DomainError, Result, Thread, ThreadId, ThreadRepository};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::error;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS threads (
    id         UUID PRIMARY KEY,
    board      TEXT NOT NULL,
    created_on TIMESTAMPTZ NOT NULL,
    bumped_on  TIMESTAMPTZ NOT NULL,
    version    BIGINT NOT NULL DEFAULT 0,
    doc        JSONB NOT NULL
)";

const CREATE_LISTING_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS threads_board_bumped_idx ON threads (board, bumped_on DESC, created_on DESC, id DESC)";

pub struct PgThreadRepository {
    pool: PgPool,
}

fn store_error(err: sqlx::Error) -> DomainError {
    error!(error = %err, "postgres thread store failure");
    DomainError::Infrastructure(err.to_string())
}

fn document_error(err: serde_json::Error) -> DomainError {
    error!(error = %err, "thread document could not be (de)serialized");
    DomainError::Infrastructure(err.to_string())
}

/// The `version` column is authoritative over the copy inside the document.
fn thread_from_row(row: &PgRow) -> Result<Thread> {
    let doc: serde_json::Value = row.try_get("doc").map_err(store_error)?;
    let version: i64 = row.try_get("version").map_err(store_error)?;
    let mut thread: Thread = serde_json::from_value(doc).map_err(document_error)?;
    thread.version = u64::try_from(version).unwrap_or_default();
    Ok(thread)
}

fn version_param(version: u64) -> Result<i64> {
    i64::try_from(version)
        .map_err(|_| DomainError::Infrastructure(format!("version {version} out of range")))
}

impl PgThreadRepository {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(store_error)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the table and listing index if they are missing.
    pub async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_TABLE, CREATE_LISTING_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(store_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn insert(&self, thread: &Thread) -> Result<()> {
        let doc = serde_json::to_value(thread).map_err(document_error)?;

        sqlx::query("INSERT INTO threads (id, board, created_on, bumped_on, version, doc) VALUES ($1, $2, $3, $4, $5, $6)")
            .bind(thread.id.as_uuid())
            .bind(&thread.board)
            .bind(thread.created_on)
            .bind(thread.bumped_on)
            .bind(version_param(thread.version)?)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: ThreadId) -> Result<Option<Thread>> {
        let row = sqlx::query("SELECT doc, version FROM threads WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        row.as_ref().map(thread_from_row).transpose()
    }

    async fn list_by_board(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT doc, version FROM threads WHERE board = $1 ORDER BY bumped_on DESC, created_on DESC, id DESC LIMIT $2",
        )
        .bind(board)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(thread_from_row).collect()
    }

    async fn save(&self, thread: &Thread) -> Result<Thread> {
        let mut next = thread.clone();
        next.version += 1;
        let doc = serde_json::to_value(&next).map_err(document_error)?;

        let updated = sqlx::query(
            "UPDATE threads SET doc = $1, bumped_on = $2, version = version + 1 WHERE id = $3 AND version = $4",
        )
        .bind(doc)
        .bind(next.bumped_on)
        .bind(thread.id.as_uuid())
        .bind(version_param(thread.version)?)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if updated.rows_affected() == 1 {
            return Ok(next);
        }

        let exists = sqlx::query("SELECT 1 FROM threads WHERE id = $1")
            .bind(thread.id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?
            .is_some();

        if exists {
            Err(DomainError::Conflict(format!(
                "thread {} changed since it was read (expected version {})",
                thread.id, thread.version
            )))
        } else {
            Err(DomainError::thread_not_found(thread.id))
        }
    }

    async fn delete_by_id(&self, id: ThreadId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(deleted.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    // Needs a running server: TEST_DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_versioned_save_roundtrip() {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
        let repo = PgThreadRepository::connect(&url, 2).await.unwrap();
        repo.migrate().await.unwrap();

        let mut thread = Thread::new("pg-test", "op", "pw", Utc::now());
        repo.insert(&thread).await.unwrap();

        let stale = thread.clone();
        thread.append_reply("first", "pw", Utc::now());
        let saved = repo.save(&thread).await.unwrap();
        assert_eq!(saved.version, 1);
        assert!(matches!(repo.save(&stale).await, Err(DomainError::Conflict(_))));

        let loaded = repo.find_by_id(thread.id).await.unwrap().unwrap();
        assert_eq!(loaded.reply_count(), 1);
        assert_eq!(loaded.version, 1);

        assert!(repo.delete_by_id(thread.id).await.unwrap());
        assert!(repo.find_by_id(thread.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore]
    async fn test_listing_breaks_bump_ties_by_creation() {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
        let repo = PgThreadRepository::connect(&url, 2).await.unwrap();
        repo.migrate().await.unwrap();

        let board = format!("pg-ties-{}", ThreadId::new());
        let t0 = Utc::now();
        let mut older = Thread::new(board.as_str(), "older", "pw", t0);
        let mut newer = Thread::new(board.as_str(), "newer", "pw", t0 + Duration::seconds(1));
        older.bumped_on = t0 + Duration::seconds(5);
        newer.bumped_on = older.bumped_on;
        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();

        let listed = repo.list_by_board(&board, 10).await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["newer", "older"]);

        for thread in [&older, &newer] {
            repo.delete_by_id(thread.id).await.unwrap();
        }
    }
}
