//! Search command

use anyhow::Result;

use devhub_core::Config;

use crate::output::Output;

/// Search the pre-built index
pub fn run(config: &Config, query: String, output: &Output) -> Result<()> {
    let site = super::load_site(config)?;

    let hits = site.index.search(&query);
    output.print_search_hits(hits.as_deref(), &site.index)
}
