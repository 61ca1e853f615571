//! Error types shared by every stage of the loader

use std::path::PathBuf;

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Error types for loader operations
#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Cache directory does not exist: {}", path.display())]
    CacheDirectoryMissing { path: PathBuf },

    #[error("Language \"{slug}\" not found in catalog")]
    UnknownLanguage { slug: String },

    #[error("No download metadata for \"{slug}\" at {url}: {reason}")]
    NoDownloadMetadata {
        slug: String,
        url: String,
        reason: String,
    },

    #[error("Invalid alignment \"{value}\" (expected leading, trailing or center)")]
    InvalidAlignment { value: String },

    #[error("Selection failed for {context}: {reason}")]
    SelectionFailed { context: String, reason: String },

    #[error("Failed to load language catalog {}: {reason}", path.display())]
    Catalog { path: PathBuf, reason: String },

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status}: {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
