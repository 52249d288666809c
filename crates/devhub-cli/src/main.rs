//! DevHub CLI
//!
//! Command-line interface for DevHub - home page previews, search and
//! deployment pipeline tasks.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use devhub_core::Config;

mod algolia;
mod commands;
mod output;
mod unfurl;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "devhub")]
#[command(about = "DevHub - discover topics, documentation, repositories and events")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page for a location
    Home {
        /// Page URL, e.g. "/?q=openshift" (defaults to the site URL)
        #[arg(short, long)]
        location: Option<String>,
        /// Date used to decide which events are current (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Search resources
    Search {
        /// Search query
        query: String,
    },
    /// Manage the search index
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },
    /// Fetch a URL and show its title, description and image
    Unfurl {
        /// URL to unfurl
        url: String,
    },
    /// Deployment pipeline tasks
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum IndexCommands {
    /// Build the search index from resources, events and meetups
    Build {
        /// Where to write the index (defaults to <data_dir>/search-index.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PipelineCommands {
    /// Delete the hosted search index of an environment
    DeleteIndex {
        /// Environment suffix; the index deleted is Devhub-Algolia-<suffix>
        #[arg(long)]
        suffix: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, site_url, search_param, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(&config);

    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet), config.card);

    match cli.command {
        Commands::Home { location, today } => {
            commands::home::show(&config, location, today, &output)
        }
        Commands::Search { query } => commands::search::run(&config, query, &output),
        Commands::Index {
            command: IndexCommands::Build { output: path },
        } => commands::index::build(&config, path, &output),
        Commands::Unfurl { url } => commands::unfurl::run(url, &output).await,
        Commands::Pipeline {
            command: PipelineCommands::DeleteIndex { suffix },
        } => commands::pipeline::delete_index(suffix, &output).await,
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => {
                commands::config::show(cli.config.as_ref(), &output)
            }
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, cli.config.as_ref(), &output)
            }
        },
    }
}

/// Initialize logging
///
/// Only initializes if DEVHUB_LOG environment variable is set.
/// Logs to config.log_file when set, otherwise to stderr.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("DEVHUB_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "devhub_core={},devhub_cli={}",
        log_level, log_level
    ));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match File::create(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
                    return;
                }
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_file)
                .try_init();
            info!("Logging to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
