//! Collection statistics
//!
//! Groups songs by genre, artist and album and counts distinct field values.
//! Grouping is exact string equality: no trimming, no case folding, and empty
//! values form a group of their own. Entries appear in the order their key is
//! first seen in the input, so a fixed input order gives a fixed output.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Result;
use crate::models::{ArtistCount, KeyCount, Song, StatisticsSnapshot};
use crate::stores::CatalogStore;

/// Compute a statistics snapshot over `songs`
pub fn compute_statistics(songs: &[Song]) -> StatisticsSnapshot {
    let mut genres = Grouping::default();
    let mut albums = Grouping::default();
    let mut artists: Vec<ArtistCount> = Vec::new();
    let mut artist_index: HashMap<&str, usize> = HashMap::new();
    let mut artist_albums: HashSet<(&str, &str)> = HashSet::new();

    for song in songs {
        genres.add(&song.genre);
        albums.add(&song.album);

        let idx = *artist_index.entry(song.artist.as_str()).or_insert_with(|| {
            artists.push(ArtistCount {
                key: song.artist.clone(),
                song_count: 0,
                distinct_album_count: 0,
            });
            artists.len() - 1
        });

        let entry = &mut artists[idx];
        entry.song_count += 1;
        if artist_albums.insert((song.artist.as_str(), song.album.as_str())) {
            entry.distinct_album_count += 1;
        }
    }

    StatisticsSnapshot {
        total_songs: songs.len(),
        total_artists: artists.len(),
        total_albums: albums.entries.len(),
        total_genres: genres.entries.len(),
        songs_by_genre: genres.entries,
        songs_by_artist: artists,
        songs_by_album: albums.entries,
    }
}

/// Read the full record set from `store` and summarize it
///
/// Store errors are returned unchanged.
pub async fn snapshot(store: &dyn CatalogStore) -> Result<StatisticsSnapshot> {
    let songs = store.list_all().await?;
    let stats = compute_statistics(&songs);
    debug!(
        "Computed statistics over {} songs ({} artists, {} genres)",
        stats.total_songs, stats.total_artists, stats.total_genres
    );
    Ok(stats)
}

/// Insertion-ordered key counter
#[derive(Default)]
struct Grouping<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<KeyCount>,
}

impl<'a> Grouping<'a> {
    fn add(&mut self, key: &'a str) {
        match self.index.get(key) {
            Some(&idx) => self.entries[idx].count += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(KeyCount {
                    key: key.to_string(),
                    count: 1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn song(artist: &str, album: &str, genre: &str) -> Song {
        Song {
            id: format!("{}-{}-{}", artist, album, genre),
            title: "Untitled".to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: genre.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn genre_count(stats: &StatisticsSnapshot, key: &str) -> Option<usize> {
        stats
            .songs_by_genre
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.count)
    }

    fn artist_entry<'a>(stats: &'a StatisticsSnapshot, key: &str) -> Option<&'a ArtistCount> {
        stats.songs_by_artist.iter().find(|a| a.key == key)
    }

    #[test]
    fn test_empty_catalog() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, StatisticsSnapshot::default());
        assert!(stats.songs_by_genre.is_empty());
        assert!(stats.songs_by_artist.is_empty());
    }

    #[test]
    fn test_small_catalog() {
        let songs = vec![
            song("A", "X", "Rock"),
            song("A", "Y", "Rock"),
            song("B", "X", "Pop"),
        ];
        let stats = compute_statistics(&songs);

        assert_eq!(stats.total_songs, 3);
        assert_eq!(stats.total_artists, 2);
        assert_eq!(stats.total_albums, 2);
        assert_eq!(stats.total_genres, 2);
        assert_eq!(genre_count(&stats, "Rock"), Some(2));
        assert_eq!(genre_count(&stats, "Pop"), Some(1));

        let a = artist_entry(&stats, "A").unwrap();
        assert_eq!((a.song_count, a.distinct_album_count), (2, 2));
        let b = artist_entry(&stats, "B").unwrap();
        assert_eq!((b.song_count, b.distinct_album_count), (1, 1));
    }

    #[test]
    fn test_distinct_albums_are_per_artist() {
        let songs = vec![
            song("Nina Simone", "A", "Jazz"),
            song("Nina Simone", "A", "Jazz"),
            song("Nina Simone", "B", "Soul"),
            song("Etta James", "C", "Soul"),
        ];
        let stats = compute_statistics(&songs);

        let nina = artist_entry(&stats, "Nina Simone").unwrap();
        assert_eq!(nina.song_count, 3);
        assert_eq!(nina.distinct_album_count, 2);
        assert_eq!(stats.total_albums, 3);
    }

    #[test]
    fn test_shared_album_title_counts_for_each_artist() {
        let songs = vec![song("A", "Greatest Hits", "Pop"), song("B", "Greatest Hits", "Pop")];
        let stats = compute_statistics(&songs);

        assert_eq!(stats.total_albums, 1);
        assert_eq!(artist_entry(&stats, "A").unwrap().distinct_album_count, 1);
        assert_eq!(artist_entry(&stats, "B").unwrap().distinct_album_count, 1);
    }

    #[test]
    fn test_no_case_folding() {
        let songs = vec![song("Queen", "X", "rock"), song("queen", "X", "Rock")];
        let stats = compute_statistics(&songs);
        assert_eq!(stats.total_artists, 2);
        assert_eq!(stats.total_genres, 2);
    }

    #[test]
    fn test_empty_values_are_counted() {
        let songs = vec![song("", "", ""), song("", "", "")];
        let stats = compute_statistics(&songs);
        assert_eq!(stats.total_artists, 1);
        assert_eq!(stats.total_albums, 1);
        assert_eq!(genre_count(&stats, ""), Some(2));
    }

    #[test]
    fn test_first_seen_order() {
        let songs = vec![
            song("C", "1", "Pop"),
            song("A", "2", "Rock"),
            song("C", "3", "Jazz"),
            song("B", "4", "Rock"),
        ];
        let stats = compute_statistics(&songs);

        let artists: Vec<&str> = stats.songs_by_artist.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(artists, vec!["C", "A", "B"]);
        let genres: Vec<&str> = stats.songs_by_genre.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(genres, vec!["Pop", "Rock", "Jazz"]);
    }

    #[test]
    fn test_input_is_untouched_and_result_repeatable() {
        let songs = vec![song("B", "1", "Pop"), song("A", "2", "Rock")];
        let before = songs.clone();

        let first = compute_statistics(&songs);
        let second = compute_statistics(&songs);

        assert_eq!(first, second);
        assert_eq!(songs, before);
    }

    #[tokio::test]
    async fn test_snapshot_reads_store() {
        use crate::models::NewSong;
        use crate::stores::SongStore;

        let store = SongStore::new();
        for (artist, genre) in [("A", "Rock"), ("B", "Pop"), ("A", "Pop")] {
            let fields = NewSong::new("t", artist, "album", genre).validate().unwrap();
            store.insert(fields).await.unwrap();
        }

        let stats = snapshot(&store).await.unwrap();
        assert_eq!(stats.total_songs, 3);
        assert_eq!(stats.total_artists, 2);
        assert_eq!(genre_count(&stats, "Pop"), Some(2));
    }

    fn arb_song() -> impl Strategy<Value = Song> {
        ("[A-D]", "[a-c]?", "(Rock|Pop|Jazz|)").prop_map(|(artist, album, genre)| {
            song(&artist, &album, &genre)
        })
    }

    proptest! {
        #[test]
        fn prop_totals_match_breakdowns(songs in prop::collection::vec(arb_song(), 0..40)) {
            let stats = compute_statistics(&songs);

            prop_assert_eq!(stats.total_songs, songs.len());
            prop_assert_eq!(stats.songs_by_genre.iter().map(|g| g.count).sum::<usize>(), songs.len());
            prop_assert_eq!(stats.songs_by_artist.iter().map(|a| a.song_count).sum::<usize>(), songs.len());
            prop_assert_eq!(stats.songs_by_album.iter().map(|a| a.count).sum::<usize>(), songs.len());
            prop_assert_eq!(stats.total_genres, stats.songs_by_genre.len());
            prop_assert_eq!(stats.total_artists, stats.songs_by_artist.len());
            prop_assert_eq!(stats.total_albums, stats.songs_by_album.len());

            for artist in &stats.songs_by_artist {
                prop_assert!(artist.distinct_album_count >= 1);
                prop_assert!(artist.distinct_album_count <= artist.song_count);
            }
        }

        #[test]
        fn prop_deterministic(songs in prop::collection::vec(arb_song(), 0..20)) {
            prop_assert_eq!(compute_statistics(&songs), compute_statistics(&songs));
        }
    }
}
