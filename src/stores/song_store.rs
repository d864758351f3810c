//! Song store - in-memory song storage with id lookups

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{new_song_id, now, CatalogStore};
use crate::error::Result;
use crate::models::{Song, SongChanges, SongFields};

/// In-memory store for songs
#[derive(Default)]
pub struct SongStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// All songs by id
    songs: HashMap<String, Song>,
    /// Ids in insertion order
    order: Vec<String>,
}

impl SongStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for SongStore {
    async fn list_all(&self) -> Result<Vec<Song>> {
        let inner = self.inner.read();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.songs.get(id).cloned())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Song>> {
        Ok(self.inner.read().songs.get(id).cloned())
    }

    async fn insert(&self, fields: SongFields) -> Result<Song> {
        let song = Song::from_fields(new_song_id(), fields, now());
        let mut inner = self.inner.write();
        inner.order.push(song.id.clone());
        inner.songs.insert(song.id.clone(), song.clone());
        Ok(song)
    }

    async fn update(&self, id: &str, changes: SongChanges) -> Result<Option<Song>> {
        let mut inner = self.inner.write();
        Ok(inner.songs.get_mut(id).map(|song| {
            song.apply(&changes, now());
            song.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner.songs.remove(id).is_none() {
            return Ok(false);
        }
        inner.order.retain(|existing| existing != id);
        Ok(true)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().songs.len())
    }
}
