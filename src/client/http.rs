//! HTTP implementation of [`CatalogApi`]

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::CatalogApi;
use crate::error::{CatalogError, Result};
use crate::models::{NewSong, Song, SongPatch, StatisticsSnapshot};

/// Catalog server client
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn songs_url(&self) -> String {
        format!("{}/api/songs", self.base_url)
    }

    fn song_url(&self, id: &str) -> String {
        format!("{}/api/songs/{}", self.base_url, id)
    }
}

/// Turn a non-success response into [`CatalogError::Status`], keeping the server's message
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    Err(CatalogError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    Ok(check(response).await?.json::<T>().await?)
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_songs(&self) -> Result<Vec<Song>> {
        let response = self.http.get(self.songs_url()).send().await?;
        read_json(response).await
    }

    async fn create_song(&self, song: &NewSong) -> Result<Song> {
        let response = self.http.post(self.songs_url()).json(song).send().await?;
        read_json(response).await
    }

    async fn update_song(&self, id: &str, patch: &SongPatch) -> Result<Song> {
        let response = self.http.put(self.song_url(id)).json(patch).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        read_json(response).await
    }

    async fn delete_song(&self, id: &str) -> Result<()> {
        let response = self.http.delete(self.song_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn statistics(&self) -> Result<StatisticsSnapshot> {
        let response = self
            .http
            .get(format!("{}/statistics", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }
}
