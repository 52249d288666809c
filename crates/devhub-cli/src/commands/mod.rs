//! Command handlers

pub mod config;
pub mod home;
pub mod index;
pub mod pipeline;
pub mod search;
pub mod unfurl;

use anyhow::Result;

use devhub_core::{Config, SiteData};

/// Load the configured site data, attaching a recovery hint on failure
pub fn load_site(config: &Config) -> Result<SiteData> {
    SiteData::load(&config.data_dir).map_err(|e| {
        let mut message = format!("Failed to load site data from {:?}", config.data_dir);
        if let Some(hint) = e.recovery_suggestion() {
            message.push_str("\nHint: ");
            message.push_str(hint);
        }
        anyhow::Error::new(e).context(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use devhub_core::site::{RESOURCES_FILE, SEARCH_INDEX_FILE};
    use tempfile::TempDir;

    fn config_for(dir: std::path::PathBuf) -> Config {
        Config {
            data_dir: dir,
            ..Config::default()
        }
    }

    #[test]
    fn test_missing_data_dir_suggests_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path().join("missing"));

        let err = load_site(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to load site data"));
        assert!(message.contains("Hint: Set data_dir"));
    }

    #[test]
    fn test_corrupt_index_suggests_rebuild() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(RESOURCES_FILE), "[]").unwrap();
        std::fs::write(temp_dir.path().join(SEARCH_INDEX_FILE), "{").unwrap();

        let err = load_site(&config_for(temp_dir.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("devhub index build"));
    }

    #[test]
    fn test_loads_valid_site() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(RESOURCES_FILE), "[]").unwrap();

        let site = load_site(&config_for(temp_dir.path().to_path_buf())).unwrap();
        assert!(site.resources.is_empty());
    }
}
