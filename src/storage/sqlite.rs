//! SQLite-backed storage with a write-behind cache
//!
//! All rows are loaded into memory when the store opens. `get` reads the
//! cache; `set` and `remove` update it immediately and queue the change for
//! a single writer task, which applies changes in the order they were made.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tokio::sync::{mpsc, oneshot};

use super::Storage;
use crate::config::db;

enum WriteOp {
    Set { key: String, value: String },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

pub struct SqliteStorage {
    cache: RwLock<HashMap<String, String>>,
    writes: mpsc::UnboundedSender<WriteOp>,
    location: String,
}

impl SqliteStorage {
    /// Open (or create) the database at `db_path` and run pending migrations
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = db::connect(db_path).await?;
        db::run_migrations(&pool).await?;
        Self::with_pool(pool, db_path.display().to_string()).await
    }

    /// Open a throwaway in-memory database
    pub async fn open_memory() -> Result<Self> {
        let pool = db::connect_memory().await?;
        db::run_migrations(&pool).await?;
        Self::with_pool(pool, ":memory:".to_string()).await
    }

    async fn with_pool(pool: SqlitePool, location: String) -> Result<Self> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM storage")
            .fetch_all(&pool)
            .await
            .context("Failed to load stored values")?;

        log::debug!("Loaded {} stored values from {}", rows.len(), location);

        let (writes, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(pool, rx));

        Ok(Self {
            cache: RwLock::new(rows.into_iter().collect()),
            writes,
            location,
        })
    }

    /// Where the database lives, for diagnostics
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Wait until every queued write has been applied
    pub async fn flush(&self) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.writes
            .send(WriteOp::Flush(done))
            .map_err(|_| anyhow::anyhow!("Storage writer has stopped"))?;
        wait.await.context("Storage writer stopped before flushing")?;
        Ok(())
    }

    fn enqueue(&self, op: WriteOp) {
        if self.writes.send(op).is_err() {
            log::error!("Storage writer has stopped; change kept in memory only");
        }
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.enqueue(WriteOp::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    fn remove(&self, key: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        self.enqueue(WriteOp::Remove {
            key: key.to_string(),
        });
    }
}

async fn run_writer(pool: SqlitePool, mut rx: mpsc::UnboundedReceiver<WriteOp>) {
    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Set { key, value } => {
                if let Err(e) = upsert(&pool, &key, &value).await {
                    log::error!("Failed to persist {}: {:#}", key, e);
                }
            }
            WriteOp::Remove { key } => {
                if let Err(e) = delete(&pool, &key).await {
                    log::error!("Failed to delete {}: {:#}", key, e);
                }
            }
            WriteOp::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    pool.close().await;
    log::debug!("Storage writer stopped");
}

async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO storage (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to write key '{}'", key))?;

    log::debug!("Persisted {}", key);
    Ok(())
}

async fn delete(pool: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM storage WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete key '{}'", key))?;

    log::debug!("Deleted {}", key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_serves_reads_immediately() {
        let storage = SqliteStorage::open_memory().await.unwrap();
        assert!(storage.get("unex.theme").is_none());

        storage.set("unex.theme", "dark");
        assert_eq!(storage.get("unex.theme").as_deref(), Some("dark"));

        storage.remove("unex.theme");
        assert!(storage.get("unex.theme").is_none());
        storage.flush().await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.db");

        {
            let storage = SqliteStorage::open(&path).await.unwrap();
            storage.set("unex.theme", "dark");
            storage.set("unex.tutorial_seen", "true");
            storage.set("unex.session", "{}");
            storage.remove("unex.session");
            storage.flush().await.unwrap();
        }

        let reopened = SqliteStorage::open(&path).await.unwrap();
        assert_eq!(reopened.get("unex.theme").as_deref(), Some("dark"));
        assert_eq!(reopened.get("unex.tutorial_seen").as_deref(), Some("true"));
        assert!(reopened.get("unex.session").is_none());
        assert_eq!(reopened.location(), path.display().to_string());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.db");

        {
            let storage = SqliteStorage::open(&path).await.unwrap();
            for value in ["light", "dark", "light", "dark"] {
                storage.set("unex.theme", value);
            }
            storage.flush().await.unwrap();
        }

        let reopened = SqliteStorage::open(&path).await.unwrap();
        assert_eq!(reopened.get("unex.theme").as_deref(), Some("dark"));
    }
}
