//! Client subcommands run against a catalog server

use anyhow::{bail, Result};
use clap::Subcommand;
use tracing::info;

use super::effects::Coordinator;
use super::state::CatalogEvent;
use super::{CatalogApi, CatalogClient};
use crate::models::{NewSong, Song, SongPatch, StatisticsSnapshot};

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// List every song
    List,

    /// Add a song
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        album: String,
        #[arg(long)]
        genre: String,
    },

    /// Change fields of an existing song
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        album: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },

    /// Delete a song
    Delete { id: String },

    /// Show collection statistics
    Stats {
        /// Compute from the fetched song list instead of asking the server
        #[arg(long)]
        local: bool,
    },
}

/// Run a client command against the server at `server_url`
pub async fn run(server_url: &str, command: ClientCommand) -> Result<()> {
    let client = CatalogClient::new(server_url)?;
    info!("Using catalog server at {}", client.base_url());

    let mut coordinator = Coordinator::new(client);

    match command {
        ClientCommand::List => {
            coordinator.dispatch(CatalogEvent::FetchRequested);
        }
        ClientCommand::Add {
            title,
            artist,
            album,
            genre,
        } => {
            let song = NewSong::new(&title, &artist, &album, &genre);
            // same rules the server applies, checked before any request goes out
            song.clone().validate()?;
            coordinator.dispatch(CatalogEvent::CreateRequested(song));
        }
        ClientCommand::Update {
            id,
            title,
            artist,
            album,
            genre,
        } => {
            let patch = SongPatch {
                title,
                artist,
                album,
                genre,
            };
            if patch.clone().validate()?.is_empty() {
                bail!("Nothing to update: pass at least one of --title, --artist, --album, --genre");
            }
            coordinator.dispatch(CatalogEvent::UpdateRequested { id, patch });
        }
        ClientCommand::Delete { id } => {
            coordinator.dispatch(CatalogEvent::DeleteRequested(id));
        }
        ClientCommand::Stats { local: false } => {
            let stats = coordinator.api().statistics().await?;
            print!("{}", render_statistics(&stats));
            return Ok(());
        }
        ClientCommand::Stats { local: true } => {
            coordinator.dispatch(CatalogEvent::FetchRequested);
            coordinator.run_until_idle().await;
            if let Some(error) = &coordinator.state().last_error {
                bail!("{}", error);
            }
            print!("{}", render_statistics(&coordinator.state().statistics()));
            return Ok(());
        }
    }

    coordinator.run_until_idle().await;

    let state = coordinator.state();
    if let Some(error) = &state.last_error {
        bail!("{}", error);
    }
    print!("{}", render_songs(&state.songs));

    Ok(())
}

fn render_songs(songs: &[Song]) -> String {
    if songs.is_empty() {
        return "No songs yet.\n".to_string();
    }

    let mut out = String::new();
    for song in songs {
        out.push_str(&format!(
            "{}  {} - {} [{}] ({})\n",
            song.id, song.artist, song.title, song.album, song.genre
        ));
    }
    out.push_str(&format!("{} song(s)\n", songs.len()));
    out
}

fn render_statistics(stats: &StatisticsSnapshot) -> String {
    if stats.is_empty() {
        return "No statistics available yet. Add some songs first.\n".to_string();
    }

    let mut out = format!(
        "Songs: {}\nArtists: {}\nAlbums: {}\nGenres: {}\n",
        stats.total_songs, stats.total_artists, stats.total_albums, stats.total_genres
    );

    out.push_str("\nSongs by genre:\n");
    for genre in &stats.songs_by_genre {
        out.push_str(&format!(
            "  {:<24} {:>5} ({:.1}%)\n",
            genre.key,
            genre.count,
            stats.share(genre.count)
        ));
    }

    out.push_str("\nSongs by artist:\n");
    for artist in &stats.songs_by_artist {
        out.push_str(&format!(
            "  {:<24} {:>5} songs, {} albums\n",
            artist.key, artist.song_count, artist.distinct_album_count
        ));
    }

    if !stats.songs_by_album.is_empty() {
        out.push_str("\nSongs by album:\n");
        for album in &stats.songs_by_album {
            out.push_str(&format!("  {:<24} {:>5}\n", album.key, album.count));
        }
    }

    out
}
