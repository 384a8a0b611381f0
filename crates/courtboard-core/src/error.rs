//! Error types for courtboard-core
//!
//! Mirrors the graceful-degradation model of the dashboard: most failures are
//! recorded in a [`LoadReport`] or logged, and only a few reach the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for courtboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove file: {path}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection not found: {collection} ({path})")]
    CollectionNotFound { collection: String, path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {origin}: {message}")]
    JsonParse {
        origin: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document shape in {origin}: expected an array or an object of records")]
    UnexpectedShape { origin: String },

    // ===================
    // Upstream Errors
    // ===================
    #[error("Upstream request failed for {url}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    // ===================
    // Lookup Errors
    // ===================
    #[error("Player not found: {query}")]
    PlayerNotFound { query: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Cache directory could not be determined")]
    CacheDirNotFound,
}

/// One skipped record in a load report
#[derive(Debug, Clone)]
pub struct LoadError {
    /// Collection and index, e.g. `teams[3]`
    pub source: String,
    pub message: String,
}

impl LoadError {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
        }
    }
}

/// Report of problems encountered while decoding a collection
///
/// Malformed records are skipped and noted here instead of failing the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub records_loaded: usize,
    pub records_skipped: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a skipped record
    pub fn skip(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.records_skipped += 1;
        self.errors.push(LoadError::new(source, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: LoadReport) {
        self.errors.extend(other.errors);
        self.records_loaded += other.records_loaded;
        self.records_skipped += other.records_skipped;
    }
}
