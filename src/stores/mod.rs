//! Catalog stores
//!
//! [`CatalogStore`] is the seam between the HTTP layer and persistence. The
//! SQLite implementation lives in [`crate::db::SongTable`]; [`SongStore`]
//! keeps everything in memory. [`TimeoutStore`] puts a time limit on
//! every call of the store it wraps.

mod song_store;
mod timeout;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Song, SongChanges, SongFields};

pub use song_store::SongStore;
pub use timeout::TimeoutStore;

/// Holds the set of songs
///
/// Inputs arrive already validated ([`SongFields`], [`SongChanges`]), so
/// implementations only assign ids and timestamps.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All songs, in insertion order
    async fn list_all(&self) -> Result<Vec<Song>>;

    /// Look up a single song
    async fn get(&self, id: &str) -> Result<Option<Song>>;

    /// Insert a new song and return it with its assigned id
    async fn insert(&self, fields: SongFields) -> Result<Song>;

    /// Apply a partial update; `None` when no song has this id
    async fn update(&self, id: &str, changes: SongChanges) -> Result<Option<Song>>;

    /// Remove a song; `false` when no song had this id
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Number of songs
    async fn count(&self) -> Result<usize>;
}

/// Generate an id for a new song
pub fn new_song_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time as unix seconds
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
