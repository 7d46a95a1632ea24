//! One org entry per calendar event.

use std::fmt::Display;

use chrono::TimeZone;

use crate::event::{EventRecord, EventStatus, Person};
use crate::org::attendee;
use crate::org::date::format_range;
use crate::org::{OrgDocument, escape};

/// Heading used for events without a title.
const DEFAULT_SUMMARY: &str = "busy";

/// Renders events as second-level org entries.
#[derive(Debug, Clone)]
pub struct EventRenderer<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz> EventRenderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Timed events are shown in `tz`.
    pub fn new(tz: Tz) -> Self {
        EventRenderer { tz }
    }

    /// False when the authenticated user declined the event. The service
    /// still returns such events; they are dropped from the agenda.
    pub fn should_render(&self, event: &EventRecord) -> bool {
        !event.attendees.iter().any(attendee::is_self_declined)
    }

    /// Append the entry for `event` to `doc`.
    pub fn render(&self, event: &EventRecord, doc: &mut OrgDocument) {
        doc.push_str(&self.entry(event));
    }

    /// The entry text for `event`.
    pub fn entry(&self, event: &EventRecord) -> String {
        let mut out = String::new();

        out.push_str(&self.heading(event));

        out.push_str(":PROPERTIES:\n");
        out.push_str(&format!(":ID:       {}\n", event.stable_id()));
        out.push_str(&format!(":GCALLINK: {}\n", event.html_link));
        if let Some(creator) = &event.creator {
            out.push_str(&format!(":CREATOR: {}\n", mail_link(creator)));
        }
        if let Some(organizer) = &event.organizer {
            out.push_str(&format!(":ORGANIZER: {}\n", mail_link(organizer)));
        }
        out.push_str(":END:\n\n");

        out.push_str(&format_range(event.start.as_ref(), event.end.as_ref(), &self.tz));
        out.push('\n');

        out.push_str(&attendee::render_block(&event.attendees));

        out.push_str(&escape(&format!("\n{}\n", event.description)));
        out.push('\n');

        if !event.attachments.is_empty() {
            out.push_str("\nAttachments:\n");
            for attachment in &event.attachments {
                out.push_str(&format!(
                    "- [[{}][{}]]\n",
                    attachment.file_url,
                    escape(&attachment.title)
                ));
            }
        }

        out
    }

    fn heading(&self, event: &EventRecord) -> String {
        let mut heading = String::from("** ");

        match event.status {
            EventStatus::Tentative => heading.push_str("(tentative) "),
            EventStatus::Cancelled => heading.push_str("(cancelled) "),
            EventStatus::Confirmed => {}
        }

        let summary = escape(&event.summary);
        if summary.is_empty() {
            heading.push_str(DEFAULT_SUMMARY);
        } else {
            heading.push_str(&summary);
        }
        heading.push('\n');
        heading
    }
}

fn mail_link(person: &Person) -> String {
    format!("[[mailto:{}][{}]]", person.email, escape(&person.name))
}
