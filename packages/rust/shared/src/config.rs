//! Application configuration for docfetch.
//!
//! User config lives at `~/.docfetch/docfetch.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DocFetchError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docfetch.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docfetch";

/// Base URL of the documentation search/bundle API.
pub const DEFAULT_BASE_URL: &str = "https://context7.com/api/v1";

// ---------------------------------------------------------------------------
// Config structs (matching docfetch.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Output rendering settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the API; search lives at `<base_url>/search`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest documentation body we accept.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_response_bytes() -> u64 {
    10 * 1024 * 1024
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for the CLI: "json" or "text".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "json".into()
}

// ---------------------------------------------------------------------------
// Fetch options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime options for the documentation client, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// API root without a trailing slash.
    pub base_url: String,
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
    /// Maximum accepted response size in bytes.
    pub max_response_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.api.timeout_secs,
            max_response_bytes: config.api.max_response_bytes,
        }
    }
}

impl FetchOptions {
    /// Replace the base URL, validating it first.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            DocFetchError::config(format!("invalid base URL '{base_url}': {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DocFetchError::config(format!(
                "base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docfetch/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocFetchError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docfetch/docfetch.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocFetchError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocFetchError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocFetchError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocFetchError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocFetchError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("context7.com"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.api.timeout_secs, 30);
        assert_eq!(parsed.output.format, "json");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[api]
base_url = "http://localhost:8080/api/v1/"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.output.format, "json");

        let opts = FetchOptions::from(&config);
        assert_eq!(opts.base_url, "http://localhost:8080/api/v1");
    }

    #[test]
    fn base_url_override_is_validated() {
        let opts = FetchOptions::default()
            .with_base_url("http://127.0.0.1:9000/")
            .expect("valid override");
        assert_eq!(opts.base_url, "http://127.0.0.1:9000");

        assert!(FetchOptions::default().with_base_url("not a url").is_err());
        assert!(
            FetchOptions::default()
                .with_base_url("ftp://example.com")
                .is_err()
        );
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let result = load_config_from(Path::new("/nonexistent/docfetch.toml"));
        assert!(matches!(result, Err(DocFetchError::Io { .. })));
    }
}
