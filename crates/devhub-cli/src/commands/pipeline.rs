//! Deployment pipeline commands

use anyhow::{Context, Result};

use crate::algolia::{
    delete_algolia_index, index_name, AlgoliaClient, AlgoliaCredentials, PipelineSettings,
};
use crate::output::Output;

/// Delete the hosted search index of an environment
///
/// Credentials come from the environment (a `.env` file is honoured).
pub async fn delete_index(suffix: String, output: &Output) -> Result<()> {
    let settings = PipelineSettings::with_suffix(suffix);
    let name = index_name(&settings.options.suffix);

    let credentials = AlgoliaCredentials::from_env()?;
    let client = AlgoliaClient::new(credentials)?;
    let response = delete_algolia_index(&client, &settings)
        .await
        .with_context(|| format!("Failed to delete index {}", name))?;

    output.success(&format!(
        "Deleted index {} (task {}, at {})",
        name, response.task_id, response.deleted_at
    ));
    Ok(())
}
