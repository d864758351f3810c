//! Statistics models

use serde::{Deserialize, Serialize};

/// Number of songs sharing one field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Per-artist breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistCount {
    pub key: String,
    pub song_count: usize,
    /// Distinct albums among this artist's songs only
    pub distinct_album_count: usize,
}

/// Aggregate view over every song in the catalog at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub total_songs: usize,
    pub total_artists: usize,
    pub total_albums: usize,
    pub total_genres: usize,
    pub songs_by_genre: Vec<KeyCount>,
    pub songs_by_artist: Vec<ArtistCount>,
    #[serde(default)]
    pub songs_by_album: Vec<KeyCount>,
}

impl StatisticsSnapshot {
    /// Percentage of all songs that `count` represents; 0 for an empty catalog
    pub fn share(&self, count: usize) -> f64 {
        if self.total_songs == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.total_songs as f64
    }

    pub fn is_empty(&self) -> bool {
        self.total_songs == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_of_empty_catalog() {
        let snapshot = StatisticsSnapshot::default();
        assert_eq!(snapshot.share(0), 0.0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_share() {
        let snapshot = StatisticsSnapshot {
            total_songs: 4,
            ..Default::default()
        };
        assert_eq!(snapshot.share(1), 25.0);
        assert_eq!(snapshot.share(4), 100.0);
    }

    #[test]
    fn test_wire_field_names() {
        let snapshot = StatisticsSnapshot {
            total_songs: 1,
            total_artists: 1,
            total_albums: 1,
            total_genres: 1,
            songs_by_genre: vec![KeyCount {
                key: "Jazz".into(),
                count: 1,
            }],
            songs_by_artist: vec![ArtistCount {
                key: "Miles Davis".into(),
                song_count: 1,
                distinct_album_count: 1,
            }],
            songs_by_album: vec![KeyCount {
                key: "Kind of Blue".into(),
                count: 1,
            }],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["totalSongs"], 1);
        assert_eq!(json["songsByGenre"][0]["key"], "Jazz");
        assert_eq!(json["songsByArtist"][0]["songCount"], 1);
        assert_eq!(json["songsByArtist"][0]["distinctAlbumCount"], 1);
        assert_eq!(json["songsByAlbum"][0]["count"], 1);
    }
}
