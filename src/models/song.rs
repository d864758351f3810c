//! Song model and the validated input shapes accepted by catalog stores

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// A catalog song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Store-assigned identifier
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Creation time (unix seconds)
    #[serde(default)]
    pub created_at: i64,
    /// Last update time (unix seconds)
    #[serde(default)]
    pub updated_at: i64,
}

impl Song {
    /// Build a song from validated fields
    pub fn from_fields(id: String, fields: SongFields, timestamp: i64) -> Self {
        Self {
            id,
            title: fields.title,
            artist: fields.artist,
            album: fields.album,
            genre: fields.genre,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Apply validated changes in place; an empty change set leaves the song untouched
    pub fn apply(&mut self, changes: &SongChanges, timestamp: i64) {
        if changes.is_empty() {
            return;
        }
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(artist) = &changes.artist {
            self.artist = artist.clone();
        }
        if let Some(album) = &changes.album {
            self.album = album.clone();
        }
        if let Some(genre) = &changes.genre {
            self.genre = genre.clone();
        }
        self.updated_at = timestamp;
    }
}

/// Create request body, as received over the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: String,
}

impl NewSong {
    pub fn new(title: &str, artist: &str, album: &str, genre: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: genre.to_string(),
        }
    }

    /// Check required fields, producing the only shape a store will insert
    pub fn validate(self) -> Result<SongFields> {
        Ok(SongFields {
            title: required("title", self.title)?,
            artist: required("artist", self.artist)?,
            album: required("album", self.album)?,
            genre: required("genre", self.genre)?,
        })
    }
}

/// Update request body; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl SongPatch {
    /// Provided fields must still be non-empty
    pub fn validate(self) -> Result<SongChanges> {
        Ok(SongChanges {
            title: self.title.map(|v| required("title", v)).transpose()?,
            artist: self.artist.map(|v| required("artist", v)).transpose()?,
            album: self.album.map(|v| required("album", v)).transpose()?,
            genre: self.genre.map(|v| required("genre", v)).transpose()?,
        })
    }
}

/// Validated, trimmed song fields ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongFields {
    title: String,
    artist: String,
    album: String,
    genre: String,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongChanges {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
}

impl SongChanges {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none() && self.genre.is_none()
    }
}

fn required(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::required(field));
    }
    Ok(trimmed.to_string())
}
