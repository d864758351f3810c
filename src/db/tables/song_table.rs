//! Song table operations

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use crate::db::DbEngine;
use crate::error::Result;
use crate::models::{Song, SongChanges, SongFields};
use crate::stores::{new_song_id, now, CatalogStore};

/// Database row for song table
#[derive(Debug, FromRow)]
struct SongRow {
    id: String,
    title: String,
    artist: String,
    album: String,
    genre: String,
    created_at: i64,
    updated_at: i64,
}

impl SongRow {
    fn into_song(self) -> Song {
        Song {
            id: self.id,
            title: self.title,
            artist: self.artist,
            album: self.album,
            genre: self.genre,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SELECT_SONG: &str =
    "SELECT id, title, artist, album, genre, created_at, updated_at FROM song";

/// SQLite-backed catalog store
#[derive(Clone)]
pub struct SongTable {
    pool: SqlitePool,
}

impl SongTable {
    pub fn new(engine: &DbEngine) -> Self {
        Self {
            pool: engine.pool().clone(),
        }
    }

    async fn fetch(&self, id: &str) -> Result<Option<Song>> {
        let row = sqlx::query_as::<_, SongRow>(&format!("{} WHERE id = ?", SELECT_SONG))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SongRow::into_song))
    }
}

#[async_trait]
impl CatalogStore for SongTable {
    async fn list_all(&self) -> Result<Vec<Song>> {
        let rows: Vec<SongRow> = sqlx::query_as(&format!("{} ORDER BY rowid", SELECT_SONG))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(SongRow::into_song).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Song>> {
        self.fetch(id).await
    }

    async fn insert(&self, fields: SongFields) -> Result<Song> {
        let song = Song::from_fields(new_song_id(), fields, now());

        sqlx::query(
            r#"
            INSERT INTO song (id, title, artist, album, genre, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&song.id)
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.album)
        .bind(&song.genre)
        .bind(song.created_at)
        .bind(song.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(song)
    }

    async fn update(&self, id: &str, changes: SongChanges) -> Result<Option<Song>> {
        if changes.is_empty() {
            return self.fetch(id).await;
        }

        // COALESCE keeps the stored value for fields the patch leaves out
        let result = sqlx::query(
            r#"
            UPDATE song SET
                title = COALESCE(?, title),
                artist = COALESCE(?, artist),
                album = COALESCE(?, album),
                genre = COALESCE(?, genre),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.title())
        .bind(changes.artist())
        .bind(changes.album())
        .bind(changes.genre())
        .bind(now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM song WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM song")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0 as usize)
    }
}
