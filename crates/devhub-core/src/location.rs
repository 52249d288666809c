//! Page location and search query handling
//!
//! The current location is passed in explicitly by whoever renders a page;
//! nothing here reads from the environment.

use reqwest::Url;
use thiserror::Error;

/// Base used to resolve relative hrefs such as `/?q=openshift`
const RELATIVE_BASE: &str = "http://localhost/";

/// Query parameter carrying the search text
pub const DEFAULT_SEARCH_PARAM: &str = "q";

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Invalid location '{href}': {details}")]
    InvalidUrl { href: String, details: String },
}

/// The location a page is being rendered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse an absolute URL or a site-relative href
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let invalid = |details: String| LocationError::InvalidUrl {
            href: href.to_string(),
            details,
        };
        let base = Url::parse(RELATIVE_BASE).map_err(|e| invalid(e.to_string()))?;
        let url = base.join(href).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { url })
    }

    /// The site root with no query string
    pub fn root() -> Self {
        Self::parse("/").expect("root location is a valid URL")
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Value of the search parameter
    ///
    /// `None` when the parameter is absent, which is distinct from an
    /// empty value (`?q=`). Repeated parameters are joined with commas.
    pub fn search_query(&self, param: &str) -> Option<String> {
        let values: Vec<String> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned())
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        }
    }

    /// The raw query string as it appears in the URL, including `?`
    ///
    /// Appended to listing routes so a followed link keeps the active search.
    pub fn search_segment(&self) -> String {
        match self.url.query() {
            Some(query) if !query.is_empty() => format!("?{}", query),
            _ => String::new(),
        }
    }
}

/// True when a query carries no search text (`""`, `" "`, `","`, ...)
pub fn is_query_empty(query: &str) -> bool {
    query.split(',').all(|part| part.trim().is_empty())
}
