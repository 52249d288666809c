//! Grouping resources by type
//!
//! `GroupingCache` memoizes the last grouping it computed together with
//! the input it was computed from. The cache belongs to the caller;
//! nothing in this crate keeps one globally.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::models::{ResourceRecord, ResourceType};

/// Resources keyed by type, iterated in `ResourceType::ALL` order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedResources {
    groups: BTreeMap<ResourceType, Vec<ResourceRecord>>,
}

impl GroupedResources {
    /// Resources of one type (empty slice when there are none)
    pub fn get(&self, resource_type: ResourceType) -> &[ResourceRecord] {
        self.groups
            .get(&resource_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, resource_type: ResourceType) -> usize {
        self.get(resource_type).len()
    }

    /// Non-empty groups in display order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, &[ResourceRecord])> {
        ResourceType::ALL
            .into_iter()
            .map(move |t| (t, self.get(t)))
            .filter(|(_, resources)| !resources.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Total number of grouped resources
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Group resources by type, keeping their relative order within a type
pub fn group_by_type(resources: &[ResourceRecord]) -> GroupedResources {
    let mut groups: BTreeMap<ResourceType, Vec<ResourceRecord>> = BTreeMap::new();
    for record in resources {
        groups
            .entry(record.resource_type())
            .or_default()
            .push(record.clone());
    }
    GroupedResources { groups }
}

/// Single-entry memo for `group_by_type`
///
/// A lookup hits only when the input equals the previous one record for
/// record, so reloaded content is never served from the cache.
#[derive(Debug, Default)]
pub struct GroupingCache {
    last: Option<(Vec<ResourceRecord>, GroupedResources)>,
    hits: u64,
    misses: u64,
}

impl GroupingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group `resources`, reusing the previous result when the input is unchanged
    pub fn group(&mut self, resources: &[ResourceRecord]) -> GroupedResources {
        if let Some((input, grouped)) = &self.last {
            if input.as_slice() == resources {
                self.hits += 1;
                trace!(resources = resources.len(), "grouping cache hit");
                return grouped.clone();
            }
        }

        self.misses += 1;
        let grouped = group_by_type(resources);
        self.last = Some((resources.to_vec(), grouped.clone()));
        grouped
    }

    /// Lookups served from the cache (diagnostics)
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to regroup (diagnostics)
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
