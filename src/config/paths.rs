//! Path management for the catalog
//!
//! This module manages the filesystem paths used by the application.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Manages all filesystem paths for the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(config: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(config)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_parent = match config_override {
            Some(path) => path,
            None => directories::ProjectDirs::from("", "", "music-catalog")
                .and_then(|dirs| dirs.config_dir().parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        // hidden folder when living directly in the user's home
        let config_dir_name = if is_home_dir(&config_parent) {
            ".music-catalog"
        } else {
            "music-catalog"
        };

        let paths = Self {
            config_dir: config_parent.join(config_dir_name),
        };

        std::fs::create_dir_all(&paths.config_dir).with_context(|| {
            format!(
                "Failed to create config directory {}",
                paths.config_dir.display()
            )
        })?;

        Ok(paths)
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the catalog database path
    pub fn app_db_path(&self) -> PathBuf {
        self.config_dir.join("catalog.db")
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Check if a path is exactly the user's home directory
fn is_home_dir(path: &Path) -> bool {
    directories::UserDirs::new()
        .map(|dirs| path == dirs.home_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = Some(temp_dir.path().to_path_buf());

        // Note: Can't use init() in tests due to OnceCell
        let paths = Paths::new(config).unwrap();

        assert!(paths.config_dir().exists());
        assert_eq!(
            paths.app_db_path(),
            temp_dir.path().join("music-catalog").join("catalog.db")
        );
        assert!(paths.settings_path().ends_with("settings.json"));
    }
}
