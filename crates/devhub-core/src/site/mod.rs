//! Site data
//!
//! The data layer exports one JSON file per collection into a data
//! directory:
//!
//! - `resources.json`: siphoned resources (required)
//! - `topics.json`: topics with their resources
//! - `events.json`: the Eventbrite feed
//! - `meetups.json`: meetup groups with their events
//! - `search-index.json`: the pre-built search index
//!
//! Optional collections default to empty. A missing search index is
//! rebuilt on load. The index covers the resources and every event and
//! meetup, whatever its date; which events are current is decided when
//! a page is composed.

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::events::{format_events, format_meetups, EventbriteEvent, MeetupGroup};
use crate::models::ResourceRecord;
use crate::search::SearchIndex;
use crate::topics::Topic;

pub use error::{SiteDataError, SiteDataResult};

pub const RESOURCES_FILE: &str = "resources.json";
pub const TOPICS_FILE: &str = "topics.json";
pub const EVENTS_FILE: &str = "events.json";
pub const MEETUPS_FILE: &str = "meetups.json";
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// Everything the data layer supplies to a page
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub resources: Vec<ResourceRecord>,
    pub topics: Vec<Topic>,
    pub events: Vec<EventbriteEvent>,
    pub meetups: Vec<MeetupGroup>,
    pub index: SearchIndex,
}

impl SiteData {
    /// Load all collections from a data directory
    pub fn load(dir: &Path) -> SiteDataResult<Self> {
        if !dir.is_dir() {
            return Err(SiteDataError::MissingDirectory {
                path: dir.to_path_buf(),
            });
        }

        let resources: Vec<ResourceRecord> = read_json(&dir.join(RESOURCES_FILE))?;
        let topics = read_optional_json(&dir.join(TOPICS_FILE))?.unwrap_or_default();
        let events = read_optional_json(&dir.join(EVENTS_FILE))?.unwrap_or_default();
        let meetups = read_optional_json(&dir.join(MEETUPS_FILE))?.unwrap_or_default();

        let mut data = Self {
            resources,
            topics,
            events,
            meetups,
            index: SearchIndex::default(),
        };

        let index_path = dir.join(SEARCH_INDEX_FILE);
        match read_optional_text(&index_path)? {
            Some(json) => {
                data.index = SearchIndex::from_json(&json).map_err(|source| {
                    SiteDataError::InvalidIndex {
                        path: index_path.clone(),
                        source,
                    }
                })?;
            }
            None => {
                info!("No search index at {:?}, building one", index_path);
                data.rebuild_index();
            }
        }

        debug!(
            resources = data.resources.len(),
            topics = data.topics.len(),
            events = data.events.len(),
            meetup_groups = data.meetups.len(),
            indexed = data.index.len(),
            "loaded site data"
        );
        Ok(data)
    }

    /// Everything searchable: resources, then all events and meetups
    pub fn searchable_resources(&self) -> Vec<ResourceRecord> {
        let events = format_events(&self.events)
            .into_iter()
            .chain(format_meetups(&self.meetups))
            .map(|dated| dated.record);
        self.resources.iter().cloned().chain(events).collect()
    }

    /// Rebuild the search index from the searchable resources
    pub fn rebuild_index(&mut self) {
        self.index = SearchIndex::build(&self.searchable_resources());
    }

    /// Write the search index as JSON, returning the path written
    pub fn write_index(&self, path: &Path) -> SiteDataResult<PathBuf> {
        let json = self
            .index
            .to_json()
            .map_err(|source| SiteDataError::InvalidIndex {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, json).map_err(|source| SiteDataError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(path.to_path_buf())
    }
}

fn read_optional_text(path: &Path) -> SiteDataResult<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| SiteDataError::from_io(e, path.to_path_buf()))
}

fn read_optional_json<T: DeserializeOwned>(path: &Path) -> SiteDataResult<Option<T>> {
    match read_optional_text(path)? {
        Some(json) => parse_json(&json, path).map(Some),
        None => Ok(None),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SiteDataResult<T> {
    let json =
        fs::read_to_string(path).map_err(|e| SiteDataError::from_io(e, path.to_path_buf()))?;
    parse_json(&json, path)
}

fn parse_json<T: DeserializeOwned>(json: &str, path: &Path) -> SiteDataResult<T> {
    serde_json::from_str(json).map_err(|source| SiteDataError::InvalidFormat {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceType;
    use tempfile::TempDir;

    const RESOURCES: &str = r#"[
        { "id": "1", "resource": { "type": "Documentation" }, "unfurl": { "title": "OpenShift 101" } },
        { "id": "2", "resource": { "type": "Repositories" }, "unfurl": { "title": "devhub-app-web" } }
    ]"#;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_load_minimal_directory() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, RESOURCES_FILE, RESOURCES);

        let data = SiteData::load(temp_dir.path()).unwrap();
        assert_eq!(data.resources.len(), 2);
        assert_eq!(data.resources[1].resource_type(), ResourceType::Repositories);
        assert!(data.topics.is_empty());
        assert!(data.events.is_empty());
        assert!(data.meetups.is_empty());
        // Index was built from the resources
        assert_eq!(data.index.len(), 2);
        assert_eq!(data.index.search("openshift").unwrap().len(), 1);
    }

    #[test]
    fn test_index_covers_events_and_meetups() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, RESOURCES_FILE, RESOURCES);
        write(
            &temp_dir,
            EVENTS_FILE,
            r#"[{ "id": "e1", "name": { "text": "OpenShift Lunch" }, "url": "https://eventbrite.example.com/e/1",
                 "start": { "local": "2030-05-01T12:00:00" } }]"#,
        );
        write(
            &temp_dir,
            MEETUPS_FILE,
            r#"[{ "name": "Cloud", "link": "https://meetup.example.com/cloud", "childrenMeetupEvent": [
                 { "id": "m1", "name": "Kubernetes Night", "link": "https://meetup.example.com/cloud/1", "local_date": "2019-05-10" }
               ] }]"#,
        );

        let data = SiteData::load(temp_dir.path()).unwrap();
        assert_eq!(data.index.len(), 4);

        // Future events are indexed too
        let hits = data.index.search("lunch").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "e1");
        assert_eq!(data.index.search("kubernetes").unwrap().len(), 1);

        let mut rebuilt = data.clone();
        rebuilt.rebuild_index();
        assert_eq!(rebuilt.index, data.index);
    }

    #[test]
    fn test_missing_directory() {
        let err = SiteData::load(Path::new("/nonexistent/devhub-data")).unwrap_err();
        assert!(matches!(err, SiteDataError::MissingDirectory { .. }));
    }

    #[test]
    fn test_missing_resources_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = SiteData::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, SiteDataError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_topics_file() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, RESOURCES_FILE, RESOURCES);
        write(&temp_dir, TOPICS_FILE, "{ not json");

        let err = SiteData::load(temp_dir.path()).unwrap_err();
        match err {
            SiteDataError::InvalidFormat { path, .. } => assert!(path.ends_with(TOPICS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_and_reload_index() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, RESOURCES_FILE, RESOURCES);

        let data = SiteData::load(temp_dir.path()).unwrap();
        let path = data
            .write_index(&temp_dir.path().join(SEARCH_INDEX_FILE))
            .unwrap();
        assert!(path.exists());

        let reloaded = SiteData::load(temp_dir.path()).unwrap();
        assert_eq!(reloaded.index, data.index);
    }

    #[test]
    fn test_corrupt_index() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, RESOURCES_FILE, RESOURCES);
        write(&temp_dir, SEARCH_INDEX_FILE, "[]");

        let err = SiteData::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, SiteDataError::InvalidIndex { .. }));
        assert!(err.recovery_suggestion().is_some());
    }
}
