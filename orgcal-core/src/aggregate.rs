//! Builds the agenda for a profile's approved calendars.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::TimeZone;
use tracing::{debug, info};

use crate::date_range::FetchWindow;
use crate::error::OrgCalResult;
use crate::event::{CalendarMetadata, CalendarSpec, EventRecord};
use crate::org::{EventRenderer, OrgDocument};
use crate::service::CalendarService;

/// Walks the approved calendars in order, one at a time, and renders
/// their events into a single document.
pub struct CalendarAggregator<'a, S, Tz: TimeZone> {
    service: &'a S,
    renderer: EventRenderer<Tz>,
    title_filters: Vec<String>,
}

impl<'a, S, Tz> CalendarAggregator<'a, S, Tz>
where
    S: CalendarService,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(service: &'a S, renderer: EventRenderer<Tz>, title_filters: Vec<String>) -> Self {
        CalendarAggregator {
            service,
            renderer,
            title_filters,
        }
    }

    /// Render every approved calendar that the service knows about.
    ///
    /// Calendars missing from the listing are skipped. Any service error
    /// aborts the whole run; no partial document is returned.
    pub async fn build(
        &self,
        calendars: &[CalendarSpec],
        window: &FetchWindow,
    ) -> OrgCalResult<OrgDocument> {
        let listing = self.service.list_calendars().await?;
        let known: HashMap<&str, &CalendarMetadata> =
            listing.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut doc = OrgDocument::new();

        for spec in calendars {
            let Some(calendar) = known.get(spec.calendar_id.as_str()) else {
                debug!(
                    "Calendar {} ({}) not in calendar list, skipping",
                    spec.calendar_id, spec.tag
                );
                continue;
            };

            doc.push_calendar_heading(calendar, &spec.tag);

            let mut events = self.fetch_all(&calendar.id, window).await?;
            sort_events(&mut events);
            self.render_events(&spec.tag, &events, &mut doc);
        }

        Ok(doc)
    }

    /// Follow page tokens until the service runs out of pages.
    async fn fetch_all(
        &self,
        calendar_id: &str,
        window: &FetchWindow,
    ) -> OrgCalResult<Vec<EventRecord>> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self
                .service
                .list_events(calendar_id, window, page_token.as_deref())
                .await?;
            pages += 1;
            events.extend(page.events);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(
            "Fetched {} events in {} pages from {}",
            events.len(),
            pages,
            calendar_id
        );
        Ok(events)
    }

    fn render_events(&self, tag: &str, events: &[EventRecord], doc: &mut OrgDocument) {
        let mut rendered = 0;
        let mut skipped = 0;

        for event in events {
            if self.wants(event) {
                self.renderer.render(event, doc);
                rendered += 1;
            } else {
                skipped += 1;
            }
        }

        info!("{}: rendered {} events, skipped {}", tag, rendered, skipped);
    }

    /// Whether `event` belongs in the agenda at all.
    fn wants(&self, event: &EventRecord) -> bool {
        !is_filtered(&event.summary, &self.title_filters) && self.renderer.should_render(event)
    }
}

/// The summary contains one of the title filters (case-sensitive).
pub fn is_filtered(summary: &str, filters: &[String]) -> bool {
    filters.iter().any(|f| summary.contains(f.as_str()))
}

/// Stable sort by event id, then drop repeats of the same id.
pub fn sort_events(events: &mut Vec<EventRecord>) {
    events.sort_by(|a, b| a.id.cmp(&b.id));
    events.dedup_by(|a, b| a.id == b.id);
}
