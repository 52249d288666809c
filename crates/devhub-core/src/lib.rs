//! DevHub Core Library
//!
//! This crate provides the core functionality for DevHub, a content
//! discovery site that lists topics and resources (documentation,
//! repositories, components, events, ...) and searches them through a
//! pre-built index.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let site = SiteData::load(&config.data_dir)?;
//! let location = Location::parse("/?q=openshift")?;
//!
//! let mut cache = GroupingCache::new();
//! let page = compose_home_page(&site, &location, today, &PageOptions::from(&config), &mut cache);
//! ```
//!
//! # Modules
//!
//! - `aggregate`: deduplication and per-type search previews
//! - `page`: home page composition
//! - `search`: the pre-built search index
//! - `site`: loading exported site data
//! - `models`: resource records and types
//! - `config`: application configuration

pub mod aggregate;
pub mod card;
pub mod config;
pub mod events;
pub mod grouping;
pub mod location;
pub mod models;
pub mod numwords;
pub mod page;
pub mod routes;
pub mod search;
pub mod site;
pub mod topics;

pub use aggregate::{
    deduplicate, describe_result_count, select_preview_resources, ResourcePreview, TextAndLink,
};
pub use card::{CardConfig, ComponentCard};
pub use config::Config;
pub use grouping::{group_by_type, GroupedResources, GroupingCache};
pub use location::{is_query_empty, Location, LocationError};
pub use models::{ResourceId, ResourceRecord, ResourceType};
pub use page::{compose_home_page, HomePage, PageOptions, Section};
pub use search::{SearchHit, SearchIndex, SearchIndexError};
pub use site::{SiteData, SiteDataError};
pub use topics::{Topic, TopicPreview};
