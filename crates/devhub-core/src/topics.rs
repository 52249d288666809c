//! Topics and their previews
//!
//! A topic is a curated grouping of resources shown on the landing page
//! when no search is active.

use serde::{Deserialize, Serialize};

use crate::aggregate::deduplicate;
use crate::grouping::{group_by_type, GroupedResources};
use crate::models::{ResourceId, ResourceRecord};
use crate::routes;

/// A named grouping of resources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
}

/// A topic with its resources grouped by type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicPreview {
    pub name: String,
    pub description: Option<String>,
    pub link: String,
    pub resources: GroupedResources,
}

/// Lowercase, hyphen-separated form of a topic name
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Previews for every topic, in the order given
pub fn topic_previews(topics: &[Topic]) -> Vec<TopicPreview> {
    topics
        .iter()
        .map(|topic| TopicPreview {
            name: topic.name.clone(),
            description: topic.description.clone(),
            link: routes::topic_route(&slugify(&topic.name)),
            resources: group_by_type(&deduplicate(&topic.resources)),
        })
        .collect()
}
