//! Provider-neutral calendar and event records.
//!
//! Providers convert their API responses into these types. Everything
//! downstream (filtering, sorting, rendering) works exclusively with them.

use crate::org::escape;

/// Sort key for attendees with no id, email or name.
pub const ANONYMOUS_SORT_KEY: &str = "sadness";

/// An approved calendar from the profile: the calendar id plus the short
/// tag its heading is grouped under.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSpec {
    pub tag: String,
    pub calendar_id: String,
}

impl CalendarSpec {
    pub fn new(tag: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        CalendarSpec {
            tag: tag.into(),
            calendar_id: calendar_id.into(),
        }
    }
}

/// A calendar as listed by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMetadata {
    pub id: String,
    pub summary: String,
    pub description: String,
}

/// A single (already expanded) calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: String,
    /// iCalendar UID, shared by every copy of the event across calendars
    pub ical_uid: String,
    pub status: EventStatus,
    pub summary: String,
    pub description: String,
    /// Link to the event in the calendar web UI
    pub html_link: String,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub creator: Option<Person>,
    pub organizer: Option<Person>,
    pub attendees: Vec<Attendee>,
    pub attachments: Vec<Attachment>,
}

impl EventRecord {
    /// Identifier written to the `:ID:` property.
    pub fn stable_id(&self) -> &str {
        if self.ical_uid.is_empty() {
            &self.id
        } else {
            &self.ical_uid
        }
    }
}

/// Start or end of an event, as sent by the service.
///
/// The text is kept unparsed; the formatter decides how to treat values
/// it cannot read.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// All-day value, `YYYY-MM-DD`
    Date(String),
    /// RFC 3339 timestamp with offset
    DateTime(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    pub fn from_api(status: &str) -> Self {
        match status {
            "tentative" => EventStatus::Tentative,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        }
    }
}

/// Creator or organizer of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    /// Profile id, usually empty for external guests
    pub id: String,
    pub email: String,
    pub name: String,
    pub response_status: ResponseStatus,
    /// Set when this attendee is the authenticated user
    pub is_self: bool,
}

impl Attendee {
    /// Ordering key: id, then email, then the escaped display name.
    /// Attendees with none of these share a fixed key.
    pub fn sort_key(&self) -> String {
        if !self.id.is_empty() {
            self.id.clone()
        } else if !self.email.is_empty() {
            self.email.clone()
        } else if !self.name.is_empty() {
            escape(&self.name)
        } else {
            ANONYMOUS_SORT_KEY.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NeedsAction,
    Declined,
    Tentative,
    Accepted,
    Unknown,
}

impl ResponseStatus {
    pub fn from_api(status: &str) -> Self {
        match status {
            "needsAction" => ResponseStatus::NeedsAction,
            "declined" => ResponseStatus::Declined,
            "tentative" => ResponseStatus::Tentative,
            "accepted" => ResponseStatus::Accepted,
            _ => ResponseStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub title: String,
    pub file_url: String,
}
