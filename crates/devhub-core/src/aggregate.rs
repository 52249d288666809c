//! Resource aggregation for search previews
//!
//! Turns the raw pool of resources (optionally narrowed by search hits)
//! into one preview per resource type, each with a count label and a
//! link to the type's listing page that keeps the active search.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::grouping::{GroupedResources, GroupingCache};
use crate::location::Location;
use crate::models::{ResourceId, ResourceRecord, ResourceType};
use crate::numwords;
use crate::routes;
use crate::search::SearchHit;

/// Link text and target for a preview's "see all" link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextAndLink {
    pub to: String,
    pub text: String,
}

/// The resources of one type shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePreview {
    pub resource_type: ResourceType,
    pub resources: Vec<ResourceRecord>,
    pub link: TextAndLink,
}

/// Remove duplicate resources
///
/// The same resource appears in several topics under different ids, so
/// non-event resources are deduplicated by title (first one wins). Events
/// are kept as-is and moved after the other resources: separate
/// occurrences of an event may share a title.
pub fn deduplicate(resources: &[ResourceRecord]) -> Vec<ResourceRecord> {
    let (events, others): (Vec<&ResourceRecord>, Vec<&ResourceRecord>) =
        resources.iter().partition(|r| r.is_event());

    let mut seen = HashSet::new();
    others
        .into_iter()
        .filter(|r| seen.insert(r.title()))
        .chain(events)
        .cloned()
        .collect()
}

/// Keep the resources matched by a search, in the resources' own order
fn narrow_to_hits(resources: &[ResourceRecord], hits: &[SearchHit]) -> Vec<ResourceRecord> {
    let ids: HashSet<&ResourceId> = hits.iter().map(|hit| &hit.id).collect();
    resources
        .iter()
        .filter(|r| ids.contains(&r.id))
        .cloned()
        .collect()
}

/// Build the per-type previews shown under a search
///
/// `search_results` of `None` or an empty list leaves the pool unfiltered.
/// Types without resources produce no preview.
pub fn select_preview_resources(
    resources: &[ResourceRecord],
    location: &Location,
    search_results: Option<&[SearchHit]>,
    cache: &mut GroupingCache,
) -> Vec<ResourcePreview> {
    let narrowed = match search_results {
        Some(hits) if !hits.is_empty() => narrow_to_hits(resources, hits),
        _ => resources.to_vec(),
    };
    let unique = deduplicate(&narrowed);
    debug!(
        pool = resources.len(),
        narrowed = narrowed.len(),
        unique = unique.len(),
        "selecting preview resources"
    );

    let grouped = cache.group(&unique);
    grouped
        .iter()
        .map(|(resource_type, members)| ResourcePreview {
            resource_type,
            resources: members.to_vec(),
            link: describe_result_count(resource_type, &grouped, location),
        })
        .collect()
}

/// Count label and listing link for one resource type
///
/// Callers only pass types with at least one resource.
pub fn describe_result_count(
    resource_type: ResourceType,
    count_per_type: &GroupedResources,
    location: &Location,
) -> TextAndLink {
    let count = count_per_type.count(resource_type);
    TextAndLink {
        to: format!(
            "{}{}",
            routes::resource_route(resource_type),
            location.search_segment()
        ),
        text: count_label(resource_type, count),
    }
}

/// "<words> <type> found", with the singular and documentation exceptions
pub fn count_label(resource_type: ResourceType, count: usize) -> String {
    let words = numwords::to_words(count as u64);
    let name = resource_type.label();

    match (resource_type, count) {
        (ResourceType::Documentation, 1) => format!("{} piece of {} found", words, name),
        (ResourceType::Documentation, _) => format!("{} pieces of {} found", words, name),
        // Label text is published as-is, spelling included.
        (ResourceType::Repositories, 1) => format!("{} respository found", words),
        (_, 1) => {
            let singular = name.strip_suffix('s').unwrap_or(&name);
            format!("{} {} found", words, singular)
        }
        _ => format!("{} {} found", words, name),
    }
}
