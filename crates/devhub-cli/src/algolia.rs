//! Algolia search index maintenance
//!
//! Deployments create one hosted index per environment, named
//! `Devhub-Algolia-<suffix>`. The pipeline removes an environment's index
//! when the environment is torn down.

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Prefix shared by every DevHub index
pub const INDEX_PREFIX: &str = "Devhub-Algolia";

pub const APP_ID_VAR: &str = "ALGOLIA_APP_ID";
pub const ADMIN_KEY_VAR: &str = "ALGOLIA_ADMIN_KEY";

#[derive(Error, Debug)]
pub enum AlgoliaError {
    #[error("Missing Algolia credential: set {0}")]
    MissingCredential(&'static str),

    #[error("Invalid Algolia URL '{url}': {details}")]
    InvalidUrl { url: String, details: String },

    #[error("Algolia request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Algolia returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Options passed to a pipeline step
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PipelineOptions {
    pub suffix: String,
}

/// Settings object a pipeline step receives
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PipelineSettings {
    pub options: PipelineOptions,
}

impl PipelineSettings {
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            options: PipelineOptions {
                suffix: suffix.into(),
            },
        }
    }
}

/// Name of the hosted index for an environment suffix
pub fn index_name(suffix: &str) -> String {
    format!("{}-{}", INDEX_PREFIX, suffix)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgoliaCredentials {
    pub app_id: String,
    pub admin_key: String,
}

impl AlgoliaCredentials {
    /// Read credentials from ALGOLIA_APP_ID and ALGOLIA_ADMIN_KEY
    pub fn from_env() -> Result<Self, AlgoliaError> {
        let read = |name: &'static str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or(AlgoliaError::MissingCredential(name))
        };
        Ok(Self {
            app_id: read(APP_ID_VAR)?,
            admin_key: read(ADMIN_KEY_VAR)?,
        })
    }
}

/// Acknowledgement returned by a delete
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeleteIndexResponse {
    #[serde(rename = "taskID")]
    pub task_id: u64,
    #[serde(rename = "deletedAt")]
    pub deleted_at: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Minimal client for the Algolia REST API
pub struct AlgoliaClient {
    http: reqwest::Client,
    credentials: AlgoliaCredentials,
    base_url: String,
}

impl AlgoliaClient {
    pub fn new(credentials: AlgoliaCredentials) -> Result<Self, AlgoliaError> {
        let base_url = format!("https://{}.algolia.net", credentials.app_id);
        Self::with_base_url(credentials, base_url)
    }

    /// Client against a specific API host
    pub fn with_base_url(
        credentials: AlgoliaCredentials,
        base_url: impl Into<String>,
    ) -> Result<Self, AlgoliaError> {
        let http = reqwest::Client::builder()
            .user_agent("DevHub pipeline")
            .build()?;
        Ok(Self {
            http,
            credentials,
            base_url: base_url.into(),
        })
    }

    /// URL of an index resource, with the name percent-encoded
    pub fn index_url(&self, name: &str) -> Result<Url, AlgoliaError> {
        let invalid = |details: String| AlgoliaError::InvalidUrl {
            url: self.base_url.clone(),
            details,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["1", "indexes", name]);
        Ok(url)
    }

    /// Delete an index
    ///
    /// Any transport failure or non-success response is returned as an
    /// error, unchanged in substance.
    pub async fn delete_index(&self, name: &str) -> Result<DeleteIndexResponse, AlgoliaError> {
        let url = self.index_url(name)?;
        info!("Deleting Algolia index {}", name);

        let response = self
            .http
            .delete(url)
            .header("X-Algolia-Application-Id", &self.credentials.app_id)
            .header("X-Algolia-API-Key", &self.credentials.admin_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(AlgoliaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Delete the index named by the pipeline settings
pub async fn delete_algolia_index(
    client: &AlgoliaClient,
    settings: &PipelineSettings,
) -> Result<DeleteIndexResponse, AlgoliaError> {
    client.delete_index(&index_name(&settings.options.suffix)).await
}
