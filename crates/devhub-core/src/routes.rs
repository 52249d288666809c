//! Main navigation routes
//!
//! Every resource type has a listing page; topics have their own.

use crate::models::ResourceType;

pub const TOPICS: &str = "/topics";

/// Base path of the listing page for a resource type
pub fn resource_route(resource_type: ResourceType) -> &'static str {
    match resource_type {
        ResourceType::Components => "/components",
        ResourceType::Documentation => "/documentation",
        ResourceType::Repositories => "/repositories",
        ResourceType::SelfServiceTools => "/self-service-tools",
        ResourceType::People => "/people",
        ResourceType::Events => "/events",
    }
}

/// Path of a single topic page
pub fn topic_route(slug: &str) -> String {
    format!("{}/{}", TOPICS, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_distinct_route() {
        let mut routes: Vec<_> = ResourceType::ALL.iter().map(|t| resource_route(*t)).collect();
        routes.sort();
        routes.dedup();
        assert_eq!(routes.len(), ResourceType::ALL.len());
        assert!(routes.iter().all(|r| r.starts_with('/')));
    }

    #[test]
    fn test_topic_route() {
        assert_eq!(topic_route("openshift-101"), "/topics/openshift-101");
    }
}
