//! Pre-built search index
//!
//! The index is built once when site data is generated and shipped as
//! JSON next to it. Searching never touches the resources themselves:
//! hits carry only ids (and a score), which the aggregator intersects with
//! its resource pool.
//!
//! ## Matching
//!
//! Terms are lowercase alphanumeric words from a resource's title,
//! description and type name. Each query word matches every indexed term
//! it is a prefix of ("open" finds "openshift"); exact matches score
//! higher than prefix matches and title words count double.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{ResourceId, ResourceRecord};

/// Format version written into every index
pub const INDEX_VERSION: u32 = 1;

const TITLE_WEIGHT: f32 = 2.0;
const BODY_WEIGHT: f32 = 1.0;
const PREFIX_FACTOR: f32 = 0.5;

#[derive(Error, Debug)]
pub enum SearchIndexError {
    #[error("Invalid search index: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported search index version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// A resource matched by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: ResourceId,
    pub score: f32,
}

/// Stored fields returned alongside hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Posting {
    id: ResourceId,
    weight: f32,
}

/// Inverted index over resource titles, descriptions and types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    version: u32,
    documents: BTreeMap<ResourceId, IndexedDocument>,
    terms: BTreeMap<String, Vec<Posting>>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            documents: BTreeMap::new(),
            terms: BTreeMap::new(),
        }
    }
}

/// Split text into lowercase alphanumeric words
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl SearchIndex {
    /// Build an index over the given resources
    ///
    /// Resources sharing an id are indexed once (the first wins).
    pub fn build(resources: &[ResourceRecord]) -> Self {
        let mut index = Self::default();
        for record in resources {
            index.add(record);
        }
        debug!(
            documents = index.documents.len(),
            terms = index.terms.len(),
            "built search index"
        );
        index
    }

    fn add(&mut self, record: &ResourceRecord) {
        if self.documents.contains_key(&record.id) {
            return;
        }

        let mut weights: HashMap<String, f32> = HashMap::new();
        for word in tokenize(record.title()) {
            *weights.entry(word).or_default() += TITLE_WEIGHT;
        }
        let body = format!(
            "{} {}",
            record.unfurl.description.as_deref().unwrap_or_default(),
            record.resource_type().display_name()
        );
        for word in tokenize(&body) {
            *weights.entry(word).or_default() += BODY_WEIGHT;
        }

        for (term, weight) in weights {
            self.terms.entry(term).or_default().push(Posting {
                id: record.id.clone(),
                weight,
            });
        }
        self.documents.insert(
            record.id.clone(),
            IndexedDocument {
                title: record.title().to_string(),
                resource_type: record.resource_type().display_name().to_string(),
            },
        );
    }

    /// Run a query against the index
    ///
    /// Returns `None` for a blank query (no search performed) and
    /// `Some` list, possibly empty, otherwise. Hits are ordered by
    /// descending score, then id.
    pub fn search(&self, query: &str) -> Option<Vec<SearchHit>> {
        let words = tokenize(query);
        if words.is_empty() {
            return None;
        }

        let mut scores: HashMap<&ResourceId, f32> = HashMap::new();
        for word in &words {
            let matching = self
                .terms
                .range(word.clone()..)
                .take_while(|(term, _)| term.starts_with(word.as_str()));
            for (term, postings) in matching {
                let factor = if term == word { 1.0 } else { PREFIX_FACTOR };
                for posting in postings {
                    *scores.entry(&posting.id).or_default() += posting.weight * factor;
                }
            }
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .map(|(id, score)| SearchHit {
                id: id.clone(),
                score,
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

        debug!(query, hits = hits.len(), "search complete");
        Some(hits)
    }

    /// Stored fields for an indexed resource
    pub fn document(&self, id: &ResourceId) -> Option<&IndexedDocument> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SearchIndexError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SearchIndexError> {
        let index: SearchIndex = serde_json::from_str(json)?;
        if index.version != INDEX_VERSION {
            return Err(SearchIndexError::UnsupportedVersion {
                found: index.version,
                expected: INDEX_VERSION,
            });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceType;

    fn resources() -> Vec<ResourceRecord> {
        vec![
            ResourceRecord::new("1", ResourceType::Documentation, "OpenShift Getting Started")
                .with_description("Deploy your first app"),
            ResourceRecord::new("2", ResourceType::Repositories, "devhub-app-web")
                .with_description("The DevHub site, built on OpenShift"),
            ResourceRecord::new("3", ResourceType::Components, "Date picker"),
        ]
    }

    fn hit_ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("OpenShift 101: Getting-Started!"),
            vec!["openshift", "101", "getting", "started"]
        );
        assert!(tokenize("  -- ").is_empty());
    }

    #[test]
    fn test_blank_query_is_no_search() {
        let index = SearchIndex::build(&resources());
        assert_eq!(index.search(""), None);
        assert_eq!(index.search("  ?! "), None);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let index = SearchIndex::build(&resources());
        assert_eq!(index.search("kubernetes"), Some(vec![]));
    }

    #[test]
    fn test_title_matches_rank_first() {
        let index = SearchIndex::build(&resources());
        let hits = index.search("openshift").unwrap();
        assert_eq!(hit_ids(&hits), vec!["1", "2"]);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_prefix_expansion() {
        let index = SearchIndex::build(&resources());
        let hits = index.search("open").unwrap();
        assert_eq!(hit_ids(&hits), vec!["1", "2"]);
    }

    #[test]
    fn test_type_name_is_searchable() {
        let index = SearchIndex::build(&resources());
        let hits = index.search("components").unwrap();
        assert_eq!(hit_ids(&hits), vec!["3"]);
    }

    #[test]
    fn test_any_word_matches() {
        let index = SearchIndex::build(&resources());
        let hits = index.search("date devhub").unwrap();
        let mut ids = hit_ids(&hits);
        ids.sort();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_duplicate_ids_indexed_once() {
        let mut input = resources();
        input.push(ResourceRecord::new("1", ResourceType::Documentation, "Other"));
        let index = SearchIndex::build(&input);
        assert_eq!(index.len(), 3);
        assert_eq!(index.document(&"1".into()).unwrap().title, "OpenShift Getting Started");
        assert_eq!(index.search("other"), Some(vec![]));
    }

    #[test]
    fn test_json_round_trip_preserves_results() {
        let index = SearchIndex::build(&resources());
        let loaded = SearchIndex::from_json(&index.to_json().unwrap()).unwrap();
        assert_eq!(loaded.search("openshift"), index.search("openshift"));
    }

    #[test]
    fn test_rejects_other_versions() {
        let json = r#"{"version": 99, "documents": {}, "terms": {}}"#;
        let err = SearchIndex::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            SearchIndexError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            SearchIndex::from_json("not json"),
            Err(SearchIndexError::Parse(_))
        ));
    }
}
