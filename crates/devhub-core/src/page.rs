//! Home page composition
//!
//! Decides what the landing page shows for a location:
//!
//! - no search text: topic previews
//! - search text with no hits: a single "no results" notice
//! - search text with hits: one resource preview per type
//!
//! Events and meetups that already started are merged into the resource
//! pool first; upcoming ones never appear in search previews.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{select_preview_resources, ResourcePreview};
use crate::config::{Config, DEFAULT_EMPTY_RESULTS_MESSAGE};
use crate::events::current_events;
use crate::grouping::GroupingCache;
use crate::location::{is_query_empty, Location, DEFAULT_SEARCH_PARAM};
use crate::site::SiteData;
use crate::topics::{topic_previews, TopicPreview};

/// Settings that shape the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub search_param: String,
    pub empty_results_message: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            search_param: DEFAULT_SEARCH_PARAM.to_string(),
            empty_results_message: DEFAULT_EMPTY_RESULTS_MESSAGE.to_string(),
        }
    }
}

impl From<&Config> for PageOptions {
    fn from(config: &Config) -> Self {
        Self {
            search_param: config.search_param.clone(),
            empty_results_message: config.empty_results_message.clone(),
        }
    }
}

/// One block of page content, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Topics { topics: Vec<TopicPreview> },
    NoResults { message: String },
    Resources { preview: ResourcePreview },
}

/// The composed landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    /// Search text shown in the masthead ("" when none)
    pub query: String,
    pub sections: Vec<Section>,
}

impl HomePage {
    pub fn shows_no_results(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(s, Section::NoResults { .. }))
    }

    pub fn topics(&self) -> Option<&[TopicPreview]> {
        self.sections.iter().find_map(|s| match s {
            Section::Topics { topics } => Some(topics.as_slice()),
            _ => None,
        })
    }

    pub fn resource_previews(&self) -> impl Iterator<Item = &ResourcePreview> {
        self.sections.iter().filter_map(|s| match s {
            Section::Resources { preview } => Some(preview),
            _ => None,
        })
    }
}

/// Compose the home page for `location`
///
/// `today` decides which events count as current; `cache` is reused
/// across calls by the caller.
pub fn compose_home_page(
    site: &SiteData,
    location: &Location,
    today: NaiveDate,
    options: &PageOptions,
    cache: &mut GroupingCache,
) -> HomePage {
    let search_param = location.search_query(&options.search_param);
    let has_query = search_param.is_some();
    let query = search_param.unwrap_or_default();

    let results = if has_query {
        site.index.search(&query)
    } else {
        None
    };

    let query_is_empty = is_query_empty(&query);
    let topics_hidden = has_query && !query_is_empty;
    let no_results = !query_is_empty
        && match &results {
            None => true,
            Some(hits) => hits.is_empty() && has_query,
        };

    debug!(
        query = query.as_str(),
        has_query,
        hits = ?results.as_ref().map(Vec::len),
        "composing home page"
    );

    let topics_section = || Section::Topics {
        topics: topic_previews(&site.topics),
    };

    let sections = if query_is_empty {
        vec![topics_section()]
    } else if no_results {
        vec![Section::NoResults {
            message: options.empty_results_message.clone(),
        }]
    } else {
        let mut pool = site.resources.clone();
        pool.extend(current_events(&site.events, &site.meetups, today));

        let previews = select_preview_resources(&pool, location, results.as_deref(), cache);

        let mut sections = Vec::with_capacity(previews.len() + 1);
        if !topics_hidden {
            sections.push(topics_section());
        }
        sections.extend(
            previews
                .into_iter()
                .map(|preview| Section::Resources { preview }),
        );
        sections
    };

    HomePage { query, sections }
}
