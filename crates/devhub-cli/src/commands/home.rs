//! Home page command

use anyhow::Result;
use chrono::NaiveDate;

use devhub_core::{compose_home_page, Config, GroupingCache, Location, PageOptions};

use crate::output::Output;

/// Compose and print the home page for a location
///
/// Without `--location` the configured site URL is used; without
/// `--today` the local date is.
pub fn show(
    config: &Config,
    location: Option<String>,
    today: Option<NaiveDate>,
    output: &Output,
) -> Result<()> {
    let href = location.unwrap_or_else(|| config.site_url.clone());
    let location = Location::parse(&href)?;
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let site = super::load_site(config)?;

    let mut cache = GroupingCache::new();
    let page = compose_home_page(
        &site,
        &location,
        today,
        &PageOptions::from(config),
        &mut cache,
    );

    output.print_home_page(&page)
}
