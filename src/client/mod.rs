//! Catalog client
//!
//! Talks to a running catalog server. Client-side state is a plain value
//! updated by [`state::reduce`]; network calls are described as
//! [`effects::Effect`]s and executed by a single [`effects::Coordinator`].

pub mod commands;
pub mod effects;
pub mod http;
pub mod state;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewSong, Song, SongPatch, StatisticsSnapshot};

pub use http::CatalogClient;

/// Remote catalog operations used by the coordinator
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_songs(&self) -> Result<Vec<Song>>;

    async fn create_song(&self, song: &NewSong) -> Result<Song>;

    async fn update_song(&self, id: &str, patch: &SongPatch) -> Result<Song>;

    async fn delete_song(&self, id: &str) -> Result<()>;

    async fn statistics(&self) -> Result<StatisticsSnapshot>;
}
