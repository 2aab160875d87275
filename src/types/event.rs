//! Tour event types

use serde::{Deserialize, Serialize};

/// A single tour date as stored in `events.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Display string; also the sort key once parsed as a calendar date.
    /// Older documents may omit it; such events sort last.
    #[serde(default)]
    pub date: String,
    #[serde(
        rename = "eventStartTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_start_time: Option<String>,
    #[serde(rename = "mySetTime", default, skip_serializing_if = "Option::is_none")]
    pub my_set_time: Option<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "ticketLink", default, skip_serializing_if = "Option::is_none")]
    pub ticket_link: Option<String>,
}

impl Event {
    /// Attach an id to a draft
    pub fn from_draft(id: String, draft: EventDraft) -> Self {
        Self {
            id,
            date: draft.date,
            event_start_time: draft.event_start_time,
            my_set_time: draft.my_set_time,
            venue: draft.venue,
            location: draft.location,
            city: draft.city,
            ticket_link: draft.ticket_link,
        }
    }
}

/// Event fields supplied by the admin when creating a new date.
///
/// Any `id` sent by the client is dropped; the store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub date: String,
    #[serde(
        rename = "eventStartTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_start_time: Option<String>,
    #[serde(rename = "mySetTime", default, skip_serializing_if = "Option::is_none")]
    pub my_set_time: Option<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "ticketLink", default, skip_serializing_if = "Option::is_none")]
    pub ticket_link: Option<String>,
}

impl EventDraft {
    /// Draft with the required display fields set
    pub fn new(date: &str, venue: &str, city: &str) -> Self {
        Self {
            date: date.to_string(),
            venue: venue.to_string(),
            city: city.to_string(),
            ..Default::default()
        }
    }
}

/// `{ "id": ... }` payload used by delete and reorder requests
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_names_are_camel_case() {
        let event = Event {
            id: "1".to_string(),
            date: "December 21, 2024".to_string(),
            event_start_time: Some("20:00".to_string()),
            my_set_time: None,
            venue: "Festivus".to_string(),
            location: "Ohio".to_string(),
            city: "Ohio".to_string(),
            ticket_link: Some("#".to_string()),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["eventStartTime"], "20:00");
        assert_eq!(value["ticketLink"], "#");
        assert!(value.get("mySetTime").is_none());
    }

    #[test]
    fn test_draft_ignores_client_id() {
        let draft: EventDraft = serde_json::from_str(
            r#"{"id":"spoofed","date":"May 1, 2025","venue":"Club","location":"","city":"Austin"}"#,
        )
        .unwrap();

        let event = Event::from_draft("42".to_string(), draft);
        assert_eq!(event.id, "42");
        assert_eq!(event.city, "Austin");
    }
}
