//! Database engine and connection management

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Database engine wrapper
#[derive(Clone)]
pub struct DbEngine {
    pool: SqlitePool,
}

impl DbEngine {
    /// Open (creating if needed) the SQLite database at `db_path`
    pub async fn connect(db_path: &Path, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30))
            .pragma("cache_size", "10000")
            .pragma("temp_store", "FILE");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        info!("Opened database at {}", db_path.display());
        Self::init(pool).await
    }

    /// Private in-memory database
    ///
    /// A single long-lived connection keeps the database alive.
    #[cfg(test)]
    pub async fn memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self> {
        create_tables(&pool).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Create all database tables
async fn create_tables(pool: &SqlitePool) -> Result<()> {
    // Song table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            album TEXT NOT NULL,
            genre TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s','now')),
            updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create song table")?;

    // Migration table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dbmigration (
            id INTEGER PRIMARY KEY,
            version INTEGER NOT NULL DEFAULT 0
        );
        INSERT OR IGNORE INTO dbmigration (id, version) VALUES (1, 0);
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create migration table")?;

    Ok(())
}
