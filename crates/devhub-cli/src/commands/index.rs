//! Search index commands

use std::path::PathBuf;

use anyhow::{Context, Result};

use devhub_core::Config;

use crate::output::Output;

/// Rebuild the search index from the site data and write it out
pub fn build(config: &Config, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let mut site = super::load_site(config)?;
    site.rebuild_index();

    let path = path.unwrap_or_else(|| config.search_index_path());
    let written = site
        .write_index(&path)
        .context("Failed to write search index")?;

    output.success(&format!(
        "Indexed {} resource(s) into {}",
        site.index.len(),
        written.display()
    ));
    Ok(())
}
