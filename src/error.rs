//! Error types for catalog operations
//!
//! Store, validation and client failures all surface as [`CatalogError`].
//! Setup code (paths, config, database bootstrap) keeps using `anyhow`.

use actix_web::http::StatusCode;

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by the catalog store, request validation and the HTTP client
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A song field failed validation
    #[error("{field} {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// No song with the given id
    #[error("Song not found: {0}")]
    NotFound(String),

    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Transport failure talking to a catalog server
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store call did not finish within the configured limit
    #[error("Store operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Catalog server answered with a non-success status
    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },
}

impl CatalogError {
    pub fn required(field: &'static str) -> Self {
        Self::Validation {
            field,
            message: "is required".to_string(),
        }
    }

    /// HTTP status a handler should answer with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
