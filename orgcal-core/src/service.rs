//! The calendar backend seam.
//!
//! The aggregator only ever lists calendars and pages through events;
//! authentication and transport belong to the implementation.

use crate::date_range::FetchWindow;
use crate::error::OrgCalResult;
use crate::event::{CalendarMetadata, EventRecord};

/// Page size requested from the service, for calendars and events alike.
pub const MAX_RESULTS: u32 = 250;

/// One page of events plus the token for the next one.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<EventRecord>,
    /// `None` once the last page has been delivered
    pub next_page_token: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait CalendarService {
    /// Calendars visible to the authenticated user (first page only).
    async fn list_calendars(&self) -> OrgCalResult<Vec<CalendarMetadata>>;

    /// One page of single-instance events of `calendar_id` inside `window`.
    async fn list_events(
        &self,
        calendar_id: &str,
        window: &FetchWindow,
        page_token: Option<&str>,
    ) -> OrgCalResult<EventPage>;
}
