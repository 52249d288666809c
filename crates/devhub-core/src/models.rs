//! Data models for DevHub
//!
//! Defines the resource record shared by every listing: a siphoned item
//! with its type, its unfurled metadata and the source it came from.

use serde::{Deserialize, Deserializer, Serialize};

/// The categories a resource can belong to
///
/// `ALL` fixes the display order used everywhere resources are grouped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    #[serde(rename = "Components")]
    Components,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Repositories")]
    Repositories,
    #[serde(rename = "Self-Service Tools")]
    SelfServiceTools,
    #[serde(rename = "People")]
    People,
    #[serde(rename = "Events")]
    Events,
}

impl ResourceType {
    /// Every resource type, in display order
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Components,
        ResourceType::Documentation,
        ResourceType::Repositories,
        ResourceType::SelfServiceTools,
        ResourceType::People,
        ResourceType::Events,
    ];

    /// The name shown on the site, e.g. "Self-Service Tools"
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceType::Components => "Components",
            ResourceType::Documentation => "Documentation",
            ResourceType::Repositories => "Repositories",
            ResourceType::SelfServiceTools => "Self-Service Tools",
            ResourceType::People => "People",
            ResourceType::Events => "Events",
        }
    }

    /// Lowercase name used inside sentences ("two repositories found")
    pub fn label(self) -> String {
        self.display_name().to_lowercase()
    }

    pub fn is_event(self) -> bool {
        self == ResourceType::Events
    }

    /// Look up a type by its display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Opaque resource identifier
///
/// The data layer hands out both string and numeric ids; both are kept
/// as their string form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ResourceId(s),
            RawId::Int(n) => ResourceId(n.to_string()),
            RawId::Float(n) => ResourceId(n.to_string()),
        })
    }
}

/// Type information and the site path of a resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceInfo {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Where the resource card links to
    #[serde(default)]
    pub path: String,
}

/// Metadata unfurled from the linked page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Unfurl {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// The content source a resource was siphoned from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub name: String,
    #[serde(default)]
    pub path: String,
}

/// A discoverable item (documentation, repository, event, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub resource: ResourceInfo,
    pub unfurl: Unfurl,
    #[serde(default)]
    pub source: Option<Source>,
}

impl ResourceRecord {
    /// Create a record with the minimum the aggregator needs
    pub fn new(id: impl Into<ResourceId>, resource_type: ResourceType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource: ResourceInfo {
                resource_type,
                path: String::new(),
            },
            unfurl: Unfurl {
                title: title.into(),
                ..Unfurl::default()
            },
            source: None,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource.resource_type
    }

    pub fn title(&self) -> &str {
        &self.unfurl.title
    }

    pub fn is_event(&self) -> bool {
        self.resource_type().is_event()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.resource.path = path.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.unfurl.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.unfurl.image = Some(image.into());
        self
    }

    pub fn with_source(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.source = Some(Source {
            name: name.into(),
            path: path.into(),
        });
        self
    }
}
