//! Configuration loading for the `menuqa` binary.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.menuqa/config.toml` (user)
//! 3. `/etc/menuqa/config.toml` (system)
//!
//! When no file exists the built-in defaults apply. The API key never lives in
//! the config file; it is read from `MENUQA_API_KEY`, then `OPENAI_API_KEY`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::pipeline::prompt::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::providers::RetryConfig;
use crate::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::{MenuError, Result};

/// Environment variables consulted for the API key, in order.
const API_KEY_ENV_VARS: &[&str] = &["MENUQA_API_KEY", "OPENAI_API_KEY"];

/// Binary configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Completion backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL (default: https://api.openai.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Completion timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Attempts per completion, including the first (default: 1).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig::new().max_attempts(self.max_attempts)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_attempts() -> u32 {
    1
}

/// Answer cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Entry lifetime in seconds (default: 600).
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Entry count above which a write sweeps expired entries (default: 1000).
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheSection {
    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig::new()
            .ttl(Duration::from_secs(self.ttl_secs))
            .max_entries(self.max_entries)
    }
}

fn default_ttl() -> u64 {
    600
}

fn default_max_entries() -> usize {
    1000
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first file found in the
    /// user and system locations is used, or the defaults if there is none.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MenuError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            MenuError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(MenuError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".menuqa").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/menuqa/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// API key from the environment, if any.
    pub fn api_key() -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.llm.base_url, "https://api.openai.com");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.max_tokens, 200);
        assert_eq!(config.llm.max_attempts, 1);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.cache.max_entries, 1000);
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [llm]
            model = "gpt-4o"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        // Defaults preserved
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.cache.ttl_secs, 600);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [llm]
            base_url = "http://localhost:8080"
            model = "llama-3.1-8b"
            timeout_secs = 10
            max_tokens = 300
            temperature = 0.2
            max_attempts = 3

            [cache]
            ttl_secs = 60
            max_entries = 50
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:8080");
        assert_eq!(config.llm.timeout(), Duration::from_secs(10));
        assert_eq!(config.llm.retry().max_attempts, 3);
        let cache = config.cache.to_cache_config();
        assert_eq!(cache.ttl, Duration::from_secs(60));
        assert_eq!(cache.max_entries, 50);
    }

    #[test]
    fn load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cache]\nttl_secs = 5").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.cache.ttl_secs, 5);
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm\nmodel = ").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, MenuError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }
}
