//! Configuration module for the catalog
//!
//! This module contains the application configuration structures and path management.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;

/// Port used when neither `--port` nor `$PORT` is given
pub const DEFAULT_PORT: u16 = 5000;

/// Default server address for client commands
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Pick the listening port: CLI flag, then `$PORT`, then [`DEFAULT_PORT`]
pub fn resolve_port(cli_port: Option<u16>, env_port: Option<&str>) -> u16 {
    cli_port
        .or_else(|| env_port.and_then(|p| p.trim().parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}
