//! Event and meetup feeds
//!
//! Eventbrite events and meetup group events arrive in their own shapes
//! and are formatted into `Events` resources so they can share the
//! resource pool with everything else.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{ResourceId, ResourceInfo, ResourceRecord, ResourceType, Source, Unfurl};

pub const EVENTBRITE_SOURCE: &str = "Eventbrite";

/// A `{ "text": ... }` field as Eventbrite sends it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextField {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventStart {
    pub local: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Logo {
    pub url: String,
}

/// An event from the Eventbrite feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventbriteEvent {
    pub id: ResourceId,
    pub name: TextField,
    #[serde(default)]
    pub description: Option<TextField>,
    pub url: String,
    pub start: EventStart,
    #[serde(default)]
    pub logo: Option<Logo>,
}

/// A single event of a meetup group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetupEvent {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub link: String,
    pub local_date: NaiveDate,
}

/// A meetup group with its events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetupGroup {
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "childrenMeetupEvent")]
    pub events: Vec<MeetupEvent>,
}

/// An event resource together with the day it starts
#[derive(Debug, Clone, PartialEq)]
pub struct DatedResource {
    pub record: ResourceRecord,
    pub start: NaiveDate,
}

impl DatedResource {
    pub fn days_from_now(&self, today: NaiveDate) -> i64 {
        days_from_now(self.start, today)
    }

    /// Started today or earlier
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.days_from_now(today) <= 0
    }
}

/// Whole days from `today` until `start` (negative once it has passed)
pub fn days_from_now(start: NaiveDate, today: NaiveDate) -> i64 {
    (start - today).num_days()
}

fn event_record(id: &ResourceId, title: &str, path: &str, source: Source) -> ResourceRecord {
    ResourceRecord {
        id: id.clone(),
        resource: ResourceInfo {
            resource_type: ResourceType::Events,
            path: path.to_string(),
        },
        unfurl: Unfurl {
            title: title.to_string(),
            ..Unfurl::default()
        },
        source: Some(source),
    }
}

pub fn format_events(events: &[EventbriteEvent]) -> Vec<DatedResource> {
    events
        .iter()
        .map(|event| {
            let mut record = event_record(
                &event.id,
                &event.name.text,
                &event.url,
                Source {
                    name: EVENTBRITE_SOURCE.to_string(),
                    path: event.url.clone(),
                },
            );
            record.unfurl.description = event
                .description
                .as_ref()
                .map(|d| d.text.clone())
                .filter(|text| !text.is_empty());
            record.unfurl.image = event.logo.as_ref().map(|logo| logo.url.clone());
            DatedResource {
                record,
                start: event.start.local.date(),
            }
        })
        .collect()
}

/// Flatten meetup groups into their events
pub fn format_meetups(groups: &[MeetupGroup]) -> Vec<DatedResource> {
    groups
        .iter()
        .flat_map(|group| {
            group.events.iter().map(move |event| {
                let mut record = event_record(
                    &event.id,
                    &event.name,
                    &event.link,
                    Source {
                        name: group.name.clone(),
                        path: group.link.clone(),
                    },
                );
                record.unfurl.description = event.description.clone();
                DatedResource {
                    record,
                    start: event.local_date,
                }
            })
        })
        .collect()
}

/// Events and meetups that started today or earlier, events first
///
/// Future events are left out of the resource pool entirely.
pub fn current_events(
    events: &[EventbriteEvent],
    groups: &[MeetupGroup],
    today: NaiveDate,
) -> Vec<ResourceRecord> {
    format_events(events)
        .into_iter()
        .chain(format_meetups(groups))
        .filter(|dated| dated.is_current(today))
        .map(|dated| dated.record)
        .collect()
}
