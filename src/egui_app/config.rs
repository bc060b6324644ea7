use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

/// Env var naming a TOML config file
pub const CONFIG_FILE_ENV: &str = "DOCSHELF_CONFIG";
/// Env var overriding the backend URL
pub const API_URL_ENV: &str = "DOCSHELF_API_URL";
/// Env var overriding the search debounce period
pub const DEBOUNCE_ENV: &str = "DOCSHELF_SEARCH_DEBOUNCE_MS";

const APP_DIR: &str = "docshelf";
const TOKEN_FILE: &str = "token";

/// Application configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Load from the process environment: defaults, then the file named by
    /// `DOCSHELF_CONFIG`, then individual env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable variable lookup
    pub fn from_sources(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Some(path) = env(CONFIG_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            let file = FileConfig::load(Path::new(path.trim()))?;
            tracing::debug!(path = %path, "loaded config file");
            builder = builder.merge_file(file);
        }

        if let Some(url) = env(API_URL_ENV) {
            builder = builder.server_url(url);
        }

        if let Some(raw) = env(DEBOUNCE_ENV) {
            let millis = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "search_debounce_ms",
                message: format!("'{}' is not a number of milliseconds", raw),
            })?;
            builder = builder.search_debounce_ms(millis);
        }

        Self::with_builder(builder)
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.app.search_debounce_ms)
    }

    pub fn preview_chars(&self) -> usize {
        self.app.preview_chars
    }

    /// Where the session token lives on disk
    pub fn session_file(&self) -> PathBuf {
        if let Some(ref path) = self.app.session_file {
            return path.clone();
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
            .join(TOKEN_FILE)
    }
}
