//! Error types for docfetch.
//!
//! Library crates use [`DocFetchError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! The bundle parser itself has no error kinds: malformed bundles degrade to
//! empty fields. Everything here belongs to the fetch/tool layer.

use std::path::PathBuf;

/// Top-level error type for all docfetch operations.
#[derive(Debug, thiserror::Error)]
pub enum DocFetchError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The library search returned no matches.
    #[error("No documentation found for '{query}'.")]
    NoResults { query: String },

    /// The top search result carried no usable identifier.
    #[error("Couldn't find library ID for\n'{result}'.")]
    MissingIdentifier { result: String },

    /// The documentation endpoint answered with a non-success status.
    #[error(
        "Error fetching documentation for {library_id} with topic \"{topic}\": {status} - {body}"
    )]
    Fetch {
        library_id: String,
        topic: String,
        status: u16,
        body: String,
    },

    /// The search endpoint answered with a non-success status.
    #[error("upstream error from {url}: {status} - {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid input (tool arguments, oversized responses, bad URLs).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocFetchError>;

impl DocFetchError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the upstream simply had nothing for this query, as opposed to
    /// a transport or server failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoResults { .. } | Self::MissingIdentifier { .. })
            || matches!(self, Self::Fetch { status: 404, .. })
    }
}
