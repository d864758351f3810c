//! Client-side catalog state and its reducer

use crate::core::compute_statistics;
use crate::models::{NewSong, Song, SongPatch, StatisticsSnapshot};

/// Songs as last fetched from the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub songs: Vec<Song>,
    pub is_loading: bool,
    /// Message of the most recent failed fetch or mutation
    pub last_error: Option<String>,
}

impl CatalogState {
    /// Statistics over the songs currently loaded
    ///
    /// Only as complete as the last fetch; the server's `/statistics` is
    /// computed over the whole catalog.
    pub fn statistics(&self) -> StatisticsSnapshot {
        compute_statistics(&self.songs)
    }
}

/// Things that happen to the client state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    FetchRequested,
    FetchSucceeded(Vec<Song>),
    FetchFailed(String),
    CreateRequested(NewSong),
    UpdateRequested { id: String, patch: SongPatch },
    DeleteRequested(String),
    MutationFailed(String),
}

/// Compute the next state; mutation requests only change state once their
/// effect reports back
pub fn reduce(state: CatalogState, event: &CatalogEvent) -> CatalogState {
    match event {
        CatalogEvent::FetchRequested => CatalogState {
            is_loading: true,
            ..state
        },
        CatalogEvent::FetchSucceeded(songs) => CatalogState {
            songs: songs.clone(),
            is_loading: false,
            last_error: None,
        },
        CatalogEvent::FetchFailed(message) => CatalogState {
            is_loading: false,
            last_error: Some(message.clone()),
            ..state
        },
        CatalogEvent::MutationFailed(message) => CatalogState {
            last_error: Some(message.clone()),
            ..state
        },
        CatalogEvent::CreateRequested(_)
        | CatalogEvent::UpdateRequested { .. }
        | CatalogEvent::DeleteRequested(_) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, artist: &str) -> Song {
        Song {
            id: id.to_string(),
            title: "t".to_string(),
            artist: artist.to_string(),
            album: "a".to_string(),
            genre: "g".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_fetch_cycle() {
        let state = reduce(CatalogState::default(), &CatalogEvent::FetchRequested);
        assert!(state.is_loading);

        let state = reduce(
            state,
            &CatalogEvent::FetchSucceeded(vec![song("1", "A"), song("2", "B")]),
        );
        assert!(!state.is_loading);
        assert_eq!(state.songs.len(), 2);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_fetch_failure_keeps_songs() {
        let state = CatalogState {
            songs: vec![song("1", "A")],
            is_loading: true,
            last_error: None,
        };
        let state = reduce(state, &CatalogEvent::FetchFailed("offline".into()));
        assert!(!state.is_loading);
        assert_eq!(state.songs.len(), 1);
        assert_eq!(state.last_error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_mutation_requests_do_not_change_state() {
        let state = CatalogState {
            songs: vec![song("1", "A")],
            ..Default::default()
        };
        let next = reduce(state.clone(), &CatalogEvent::DeleteRequested("1".into()));
        assert_eq!(next, state);
    }

    #[test]
    fn test_local_statistics() {
        let state = CatalogState {
            songs: vec![song("1", "A"), song("2", "A"), song("3", "B")],
            ..Default::default()
        };
        let stats = state.statistics();
        assert_eq!(stats.total_songs, 3);
        assert_eq!(stats.total_artists, 2);
    }
}
