//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use devhub_core::Config;

use crate::output::{Output, OutputFormat};

const VALID_KEYS: &str =
    "data_dir, site_url, search_param, empty_results_message, log_file, max_title_lines, max_description_lines";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "site_url": config.site_url,
                    "search_param": config.search_param,
                    "empty_results_message": config.empty_results_message,
                    "log_file": config.log_file,
                    "card": config.card,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:              {}", config.data_dir.display());
            println!("  site_url:              {}", config.site_url);
            println!("  search_param:          {}", config.search_param);
            println!("  empty_results_message: {}", config.empty_results_message);
            println!(
                "  log_file:              {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  max_title_lines:       {}", config.card.max_title_lines);
            println!(
                "  max_description_lines: {}",
                config.card.max_description_lines
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Apply `key = value` to a configuration
pub fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "site_url" => {
            config.site_url = value.to_string();
        }
        "search_param" => {
            if value.trim().is_empty() {
                bail!("search_param cannot be empty");
            }
            config.search_param = value.to_string();
        }
        "empty_results_message" => {
            config.empty_results_message = value.to_string();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "max_title_lines" => {
            config.card.max_title_lines = value
                .parse()
                .context("Invalid value for max_title_lines. Use a whole number.")?;
        }
        "max_description_lines" => {
            config.card.max_description_lines = value
                .parse()
                .context("Invalid value for max_description_lines. Use a whole number.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                VALID_KEYS
            );
        }
    }
    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
