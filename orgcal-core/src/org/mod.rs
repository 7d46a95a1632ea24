//! Org-mode outline output.
//!
//! The document is consumed by org-agenda, which parses the `<...>` date
//! syntax and the `:PROPERTIES:`/`:END:` drawers literally, so the exact
//! byte layout here is part of the contract.

pub mod attendee;
pub mod date;
pub mod entry;

use crate::event::CalendarMetadata;

pub use entry::EventRenderer;

/// First lines of every generated agenda.
pub const HEADER: &str = "# -*- eval: (auto-revert-mode 1); -*-\n#+category: cal\n";

/// Neutralize characters that org would read as markup.
///
/// Square brackets delimit links, and a `*` at the start of a line opens
/// a new heading.
pub fn escape(s: &str) -> String {
    s.replace('[', "{")
        .replace(']', "}")
        .replace("\n*", "\n,*")
}

/// The agenda being built. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgDocument {
    buf: String,
}

impl Default for OrgDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgDocument {
    /// A document containing only the header.
    pub fn new() -> Self {
        OrgDocument {
            buf: HEADER.to_string(),
        }
    }

    /// Top-level heading for one calendar, tagged `:CALENDAR:<tag>:`.
    pub fn push_calendar_heading(&mut self, calendar: &CalendarMetadata, tag: &str) {
        self.buf
            .push_str(&format!("* {} :CALENDAR:{}:\n", calendar.summary, tag));
        self.buf.push_str(":PROPERTIES:\n");
        self.buf.push_str(&format!(":ID:         {}\n", calendar.id));
        self.buf.push_str(":END:\n");
        self.buf
            .push_str(&format!("\n  {}\n\n", calendar.description));
    }

    pub fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
