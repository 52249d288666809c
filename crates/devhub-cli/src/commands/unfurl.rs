//! Unfurl command

use anyhow::Result;

use crate::output::Output;
use crate::unfurl::fetch_unfurl;

/// Fetch a URL and print its unfurled metadata
pub async fn run(url: String, output: &Output) -> Result<()> {
    let unfurl = fetch_unfurl(&url).await;
    output.print_unfurl(&unfurl)
}
