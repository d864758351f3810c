//! Database migrations

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Current migration version
const CURRENT_VERSION: i32 = 2;

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let row: (i32,) = sqlx::query_as("SELECT version FROM dbmigration WHERE id = 1")
        .fetch_one(pool)
        .await?;
    let current_version = row.0;

    if current_version >= CURRENT_VERSION {
        info!("Database is up to date (version {})", current_version);
        return Ok(());
    }

    info!(
        "Running migrations from version {} to {}",
        current_version, CURRENT_VERSION
    );

    for version in (current_version + 1)..=CURRENT_VERSION {
        run_migration(pool, version).await?;

        sqlx::query("UPDATE dbmigration SET version = ? WHERE id = 1")
            .bind(version)
            .execute(pool)
            .await?;

        info!("Applied migration {}", version);
    }

    Ok(())
}

async fn run_migration(pool: &SqlitePool, version: i32) -> Result<()> {
    match version {
        1 => {
            // Initial schema is created by the engine
        }
        2 => {
            // databases created before updated_at existed
            let has_column: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM pragma_table_info('song') WHERE name = 'updated_at'",
            )
            .fetch_one(pool)
            .await?;

            if has_column == 0 {
                sqlx::query("ALTER TABLE song ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0")
                    .execute(pool)
                    .await?;
                sqlx::query("UPDATE song SET updated_at = created_at")
                    .execute(pool)
                    .await?;
            }
        }
        _ => {
            tracing::warn!("Unknown migration version: {}", version);
        }
    }

    Ok(())
}
