//! Calendar v3 REST payloads, and their conversion into orgcal-core types.
//!
//! Only the fields the agenda needs are modelled; everything else in the
//! response is ignored.

use orgcal_core::{
    Attachment, Attendee, CalendarMetadata, EventRecord, EventStatus, EventTime, Person,
    ResponseStatus,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarList {
    #[serde(default)]
    pub items: Vec<CalendarListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarListEntry {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Events {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleEvent {
    pub id: String,
    #[serde(rename = "iCalUID")]
    pub ical_uid: String,
    pub status: String,
    pub summary: String,
    pub description: String,
    pub html_link: String,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
    pub creator: Option<GooglePerson>,
    pub organizer: Option<GooglePerson>,
    pub attendees: Vec<GoogleAttendee>,
    pub attachments: Vec<GoogleAttachment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDateTime {
    pub date: Option<String>,
    pub date_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GooglePerson {
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleAttendee {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub response_status: String,
    #[serde(rename = "self")]
    pub is_self: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleAttachment {
    pub title: String,
    pub file_url: String,
}

impl From<CalendarListEntry> for CalendarMetadata {
    fn from(entry: CalendarListEntry) -> Self {
        CalendarMetadata {
            id: entry.id,
            summary: entry.summary,
            description: entry.description,
        }
    }
}

impl From<GooglePerson> for Person {
    fn from(person: GooglePerson) -> Self {
        Person {
            name: person.display_name,
            email: person.email,
        }
    }
}

impl From<GoogleAttendee> for Attendee {
    fn from(a: GoogleAttendee) -> Self {
        Attendee {
            id: a.id,
            email: a.email,
            name: a.display_name,
            response_status: ResponseStatus::from_api(&a.response_status),
            is_self: a.is_self,
        }
    }
}

impl From<GoogleAttachment> for Attachment {
    fn from(a: GoogleAttachment) -> Self {
        Attachment {
            title: a.title,
            file_url: a.file_url,
        }
    }
}

/// `dateTime` wins over `date`; neither means no value.
fn event_time(value: Option<EventDateTime>) -> Option<EventTime> {
    let value = value?;
    match (value.date_time, value.date) {
        (Some(dt), _) if !dt.is_empty() => Some(EventTime::DateTime(dt)),
        (_, Some(d)) if !d.is_empty() => Some(EventTime::Date(d)),
        _ => None,
    }
}

impl From<GoogleEvent> for EventRecord {
    fn from(event: GoogleEvent) -> Self {
        EventRecord {
            id: event.id,
            ical_uid: event.ical_uid,
            status: EventStatus::from_api(&event.status),
            summary: event.summary,
            description: event.description,
            html_link: event.html_link,
            start: event_time(event.start),
            end: event_time(event.end),
            creator: event.creator.map(Person::from),
            organizer: event.organizer.map(Person::from),
            attendees: event.attendees.into_iter().map(Attendee::from).collect(),
            attachments: event.attachments.into_iter().map(Attachment::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_page_from_json() {
        let json = r#"{
            "kind": "calendar#events",
            "nextPageToken": "CkAKMjA",
            "items": [
                {
                    "id": "abc123",
                    "iCalUID": "abc123@google.com",
                    "status": "tentative",
                    "htmlLink": "https://www.google.com/calendar/event?eid=abc",
                    "summary": "Planning",
                    "start": {"dateTime": "2025-03-20T15:00:00+01:00", "timeZone": "Europe/Copenhagen"},
                    "end": {"dateTime": "2025-03-20T16:00:00+01:00"},
                    "creator": {"email": "alice@example.com", "displayName": "Alice"},
                    "organizer": {"email": "alice@example.com", "self": true},
                    "attendees": [
                        {"email": "me@example.com", "self": true, "responseStatus": "declined"},
                        {"email": "bob@example.com", "displayName": "Bob", "responseStatus": "needsAction"}
                    ],
                    "attachments": [
                        {"fileUrl": "https://drive.google.com/file/d/1", "title": "Notes"}
                    ]
                },
                {
                    "id": "allday",
                    "start": {"date": "2025-03-20"},
                    "end": {"date": "2025-03-21"}
                }
            ]
        }"#;

        let page: Events = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CkAKMjA"));

        let mut events: Vec<EventRecord> = page.items.into_iter().map(EventRecord::from).collect();
        let all_day = events.pop().unwrap();
        let timed = events.pop().unwrap();

        assert_eq!(timed.id, "abc123");
        assert_eq!(timed.stable_id(), "abc123@google.com");
        assert_eq!(timed.status, EventStatus::Tentative);
        assert_eq!(
            timed.start,
            Some(EventTime::DateTime("2025-03-20T15:00:00+01:00".to_string()))
        );
        assert_eq!(timed.creator.as_ref().map(|p| p.name.as_str()), Some("Alice"));
        assert_eq!(timed.organizer.as_ref().map(|p| p.name.as_str()), Some(""));
        assert!(timed.attendees[0].is_self);
        assert_eq!(timed.attendees[0].response_status, ResponseStatus::Declined);
        assert_eq!(timed.attendees[1].response_status, ResponseStatus::NeedsAction);
        assert_eq!(timed.attachments[0].title, "Notes");

        assert_eq!(all_day.status, EventStatus::Confirmed);
        assert_eq!(all_day.start, Some(EventTime::Date("2025-03-20".to_string())));
        assert!(all_day.attendees.is_empty());
    }

    #[test]
    fn test_calendar_list_from_json() {
        let json = r#"{
            "items": [
                {"id": "me@example.com", "summary": "Me", "primary": true},
                {"id": "team@group.calendar.google.com", "summary": "Team", "description": "Shared"}
            ]
        }"#;

        let list: CalendarList = serde_json::from_str(json).unwrap();
        let calendars: Vec<CalendarMetadata> = list.items.into_iter().map(Into::into).collect();

        assert_eq!(calendars[0].description, "");
        assert_eq!(calendars[1].summary, "Team");
        assert_eq!(calendars[1].description, "Shared");
    }

    #[test]
    fn test_missing_start_is_none() {
        let event: GoogleEvent = serde_json::from_str(r#"{"id": "x", "start": {}}"#).unwrap();
        assert_eq!(EventRecord::from(event).start, None);
    }
}
