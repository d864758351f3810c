//! Data models for the catalog
//!
//! Songs, the validated request shapes that produce them, and the derived
//! statistics snapshot.

mod song;
mod stats;

pub use song::{NewSong, Song, SongChanges, SongFields, SongPatch};
pub use stats::{ArtistCount, KeyCount, StatisticsSnapshot};
