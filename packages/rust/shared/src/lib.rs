//! Shared types, error model, and configuration for docfetch.
//!
//! This crate is the foundation depended on by all other docfetch crates.
//! It provides:
//! - [`DocFetchError`]: the unified error type
//! - Domain records ([`CodeSnippet`], [`QaPair`], [`DocumentationResult`])
//! - Configuration ([`AppConfig`], [`FetchOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, AppConfig, DEFAULT_BASE_URL, FetchOptions, OutputConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{DocFetchError, Result};
pub use types::{CodeSnippet, DocumentationResult, QaPair, SECTION_SEPARATOR};
