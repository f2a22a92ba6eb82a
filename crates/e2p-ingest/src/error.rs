//! Error types for event loading and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the event feed.
#[derive(Debug, Error)]
pub enum LoadError {
    // === Source Errors ===
    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read standard input.
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// The HTTP request could not be completed.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    // === Payload Errors ===
    /// The payload is not a JSON array of event objects.
    #[error("invalid event data from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The feed parsed but holds no events.
    #[error("no events in {origin}")]
    NoEvents { origin: String },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON or has a bad value.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
