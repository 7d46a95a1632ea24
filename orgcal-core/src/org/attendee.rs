//! Attendee lines.

use crate::event::{Attendee, ResponseStatus};
use crate::org::escape;

/// Above this many attendees the list collapses to [`MANY_ATTENDEES_LINE`].
pub const MANY_ATTENDEES_THRESHOLD: usize = 20;

pub const MANY_ATTENDEES_LINE: &str = "... Many\n";

pub fn status_glyph(status: ResponseStatus) -> &'static str {
    match status {
        ResponseStatus::Declined => "✗",
        ResponseStatus::Tentative => "☐",
        ResponseStatus::Accepted => "✓",
        ResponseStatus::NeedsAction | ResponseStatus::Unknown => " ",
    }
}

/// ` ✓ [[mailto:alice@example.com][Alice]]` plus newline. The email is
/// shown when there is no display name.
pub fn render_line(attendee: &Attendee) -> String {
    let mut name = escape(&attendee.name);
    if name.is_empty() {
        name = attendee.email.clone();
    }

    format!(
        " {} [[mailto:{}][{}]]\n",
        status_glyph(attendee.response_status),
        attendee.email,
        name
    )
}

/// The authenticated user declined this invitation.
pub fn is_self_declined(attendee: &Attendee) -> bool {
    attendee.is_self && attendee.response_status == ResponseStatus::Declined
}

/// The `Attendees:` block, sorted by [`Attendee::sort_key`]. Empty when
/// there are no attendees.
pub fn render_block(attendees: &[Attendee]) -> String {
    if attendees.is_empty() {
        return String::new();
    }

    let mut block = String::from("Attendees:\n");

    if attendees.len() > MANY_ATTENDEES_THRESHOLD {
        block.push_str(MANY_ATTENDEES_LINE);
        return block;
    }

    let mut sorted: Vec<&Attendee> = attendees.iter().collect();
    sorted.sort_by_cached_key(|a| a.sort_key());

    for attendee in sorted {
        block.push_str(&render_line(attendee));
    }

    block
}
