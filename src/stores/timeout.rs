//! Per-call time limit around another catalog store

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::warn;

use super::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::models::{Song, SongChanges, SongFields};

/// Fails any store call that runs longer than `limit` with [`CatalogError::Timeout`]
///
/// The timed-out call is dropped; a write that already reached SQLite is not
/// rolled back.
pub struct TimeoutStore {
    inner: Arc<dyn CatalogStore>,
    limit: Duration,
}

impl TimeoutStore {
    pub fn new(inner: Arc<dyn CatalogStore>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn limited<T>(&self, op: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Store {} exceeded {:?}", op, self.limit);
                Err(CatalogError::Timeout(self.limit))
            }
        }
    }
}

#[async_trait]
impl CatalogStore for TimeoutStore {
    async fn list_all(&self) -> Result<Vec<Song>> {
        self.limited("list", self.inner.list_all()).await
    }

    async fn get(&self, id: &str) -> Result<Option<Song>> {
        self.limited("get", self.inner.get(id)).await
    }

    async fn insert(&self, fields: SongFields) -> Result<Song> {
        self.limited("insert", self.inner.insert(fields)).await
    }

    async fn update(&self, id: &str, changes: SongChanges) -> Result<Option<Song>> {
        self.limited("update", self.inner.update(id, changes)).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.limited("delete", self.inner.delete(id)).await
    }

    async fn count(&self) -> Result<usize> {
        self.limited("count", self.inner.count()).await
    }
}
