//! Application configuration module
//!
//! `AppConfig` holds every tunable the client reads at startup. Values come
//! from built-in defaults, then an optional TOML file, then environment
//! variables; the desktop `Config` wrapper decides where those sources live.
//!
//! ```toml
//! server_url = "http://127.0.0.1:8000"
//! search_debounce_ms = 300
//! preview_chars = 150
//! session_file = "/home/me/.config/docshelf/token"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Backend address used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Quiet period before a search keystroke turns into a request
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Characters of content shown in a list preview
pub const DEFAULT_PREVIEW_CHARS: usize = 150;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash
    pub server_url: String,
    /// Search debounce quiet period in milliseconds
    pub search_debounce_ms: u64,
    /// Preview length in characters
    pub preview_chars: usize,
    /// Where the session token is persisted, if not the platform default
    pub session_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            session_file: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingValue("server_url"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }
        if self.preview_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "preview_chars",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Values as they appear in a config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub search_debounce_ms: Option<u64>,
    pub preview_chars: Option<usize>,
    pub session_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    search_debounce_ms: Option<u64>,
    preview_chars: Option<usize>,
    session_file: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn search_debounce_ms(mut self, millis: u64) -> Self {
        self.search_debounce_ms = Some(millis);
        self
    }

    pub fn preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = Some(chars);
        self
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Layer every value present in a config file over the builder
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(millis) = file.search_debounce_ms {
            self.search_debounce_ms = Some(millis);
        }
        if let Some(chars) = file.preview_chars {
            self.preview_chars = Some(chars);
        }
        if let Some(path) = file.session_file {
            self.session_file = Some(path);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            search_debounce_ms: self.search_debounce_ms.unwrap_or(defaults.search_debounce_ms),
            preview_chars: self.preview_chars.unwrap_or(defaults.preview_chars),
            session_file: self.session_file,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = AppConfig::builder()
            .server_url("https://docs.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.server_url, "https://docs.example.com");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = AppConfig::builder().server_url("ftp://example.com").build();
        assert_matches!(result, Err(ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_zero_preview() {
        let result = AppConfig::builder().preview_chars(0).build();
        assert_matches!(result, Err(ConfigError::InvalidValue { key: "preview_chars", .. }));
    }

    #[test]
    fn test_file_values_override_builder() {
        let file = FileConfig::from_toml_str(
            "server_url = \"http://10.0.0.5:8000\"\nsearch_debounce_ms = 500\n",
        )
        .unwrap();
        let config = AppConfig::builder()
            .server_url("http://ignored:1")
            .merge_file(file)
            .build()
            .unwrap();
        assert_eq!(config.server_url, "http://10.0.0.5:8000");
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.preview_chars, DEFAULT_PREVIEW_CHARS);
    }

    #[test]
    fn test_unknown_file_key_is_an_error() {
        let result = FileConfig::from_toml_str("sever_url = \"http://typo\"\n");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }
}
