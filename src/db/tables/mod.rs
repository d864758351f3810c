//! Database table operations

mod song_table;

pub use song_table::SongTable;
