//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/devhub/config.toml)
//! 3. Environment variables (DEVHUB_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::card::CardConfig;
use crate::location::DEFAULT_SEARCH_PARAM;

/// Environment variable prefix
const ENV_PREFIX: &str = "DEVHUB";

pub const DEFAULT_EMPTY_RESULTS_MESSAGE: &str = "No results found.";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the exported site data (resources.json, ...)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Public site URL, used when no location is given
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Query parameter carrying the search text
    #[serde(default = "default_search_param")]
    pub search_param: String,

    /// Notice shown when a search finds nothing
    #[serde(default = "default_empty_results_message")]
    pub empty_results_message: String,

    /// Log file path (logs go to stderr when unset)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Card text limits
    #[serde(default)]
    pub card: CardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            site_url: default_site_url(),
            search_param: default_search_param(),
            empty_results_message: default_empty_results_message(),
            log_file: None,
            card: CardConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (DEVHUB_DATA_DIR, DEVHUB_SITE_URL, ...)
    /// 2. Config file (~/.config/devhub/config.toml or DEVHUB_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // DEVHUB_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // DEVHUB_SITE_URL
        if let Ok(val) = std::env::var(format!("{}_SITE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.site_url = val;
            }
        }

        // DEVHUB_SEARCH_PARAM
        if let Ok(val) = std::env::var(format!("{}_SEARCH_PARAM", ENV_PREFIX)) {
            if !val.is_empty() {
                self.search_param = val;
            }
        }

        // DEVHUB_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with DEVHUB_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("devhub")
            .join("config.toml")
    }

    /// Get the path to the search index file
    pub fn search_index_path(&self) -> PathBuf {
        self.data_dir.join(crate::site::SEARCH_INDEX_FILE)
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devhub")
}

fn default_site_url() -> String {
    "http://localhost:8000/".to_string()
}

fn default_search_param() -> String {
    DEFAULT_SEARCH_PARAM.to_string()
}

fn default_empty_results_message() -> String {
    DEFAULT_EMPTY_RESULTS_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "DEVHUB_DATA_DIR",
        "DEVHUB_SITE_URL",
        "DEVHUB_SEARCH_PARAM",
        "DEVHUB_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search_param, "q");
        assert_eq!(config.empty_results_message, DEFAULT_EMPTY_RESULTS_MESSAGE);
        assert!(config.log_file.is_none());
        assert!(config.data_dir.ends_with("devhub"));
        assert_eq!(config.card, CardConfig::default());
    }

    #[test]
    fn test_search_index_path() {
        let config = Config::default();
        assert!(config.search_index_path().ends_with("search-index.json"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("DEVHUB_DATA_DIR", "/tmp/devhub-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/devhub-test"));
    }

    #[test]
    fn test_env_override_search_param() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("DEVHUB_SEARCH_PARAM", "search");
        config.apply_env_overrides();
        assert_eq!(config.search_param, "search");

        // Empty keeps the current value
        env::set_var("DEVHUB_SEARCH_PARAM", "");
        config.apply_env_overrides();
        assert_eq!(config.search_param, "search");
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("DEVHUB_LOG_FILE", "/tmp/devhub.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/devhub.log")));

        // Empty string clears it
        env::set_var("DEVHUB_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/devhub"),
            site_url: "https://developer.example.com/".to_string(),
            search_param: "q".to_string(),
            empty_results_message: "Nothing here".to_string(),
            log_file: None,
            card: CardConfig {
                max_title_lines: 1,
                max_description_lines: 5,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("empty_results_message"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.site_url, config.site_url);
        assert_eq!(parsed.empty_results_message, config.empty_results_message);
        assert_eq!(parsed.card, config.card);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            site_url = "https://developer.example.com/"
            empty_results_message = "Try another search"

            [card]
            max_title_lines = 1
            max_description_lines = 2
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.site_url, "https://developer.example.com/");
        assert_eq!(config.empty_results_message, "Try another search");
        assert_eq!(config.search_param, "q");
        assert_eq!(config.card.max_description_lines, 2);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.search_param, "q");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.empty_results_message = "Saved message".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.empty_results_message, "Saved message");
    }
}
