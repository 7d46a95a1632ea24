//! Google Calendar backend.
//!
//! Talks to the Calendar v3 REST API directly with a bearer token read
//! from the profile's token file.

mod session;
mod types;

use orgcal_core::service::MAX_RESULTS;
use orgcal_core::{
    CalendarMetadata, CalendarService, EventPage, EventRecord, FetchWindow, OrgCalError,
    OrgCalResult,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Profile;
use session::Session;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3/";

/// Authenticated Calendar API client.
pub struct GoogleCalendar {
    client: Client,
    base: Url,
    access_token: String,
}

impl GoogleCalendar {
    /// Build a client from the profile's token file.
    pub async fn connect(profile: &Profile) -> anyhow::Result<Self> {
        let session =
            Session::load_valid(&profile.token_file, profile.oauth_client.as_ref()).await?;
        Self::with_base(API_BASE, session.access_token())
    }

    /// Client against another API root.
    pub fn with_base(base: &str, access_token: &str) -> anyhow::Result<Self> {
        Ok(GoogleCalendar {
            client: Client::new(),
            base: Url::parse(base)?,
            access_token: access_token.to_string(),
        })
    }

    fn calendar_list_url(&self) -> OrgCalResult<Url> {
        let mut url = self.endpoint(&["users", "me", "calendarList"])?;
        url.query_pairs_mut()
            .append_pair("showHidden", "false")
            .append_pair("showDeleted", "false")
            .append_pair("maxResults", &MAX_RESULTS.to_string());
        Ok(url)
    }

    fn events_url(
        &self,
        calendar_id: &str,
        window: &FetchWindow,
        page_token: Option<&str>,
    ) -> OrgCalResult<Url> {
        let mut url = self.endpoint(&["calendars", calendar_id, "events"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("showDeleted", "false")
                .append_pair("singleEvents", "true")
                .append_pair("timeMin", &window.time_min())
                .append_pair("timeMax", &window.time_max())
                .append_pair("maxResults", &MAX_RESULTS.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }

    /// API root joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> OrgCalResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| OrgCalError::Service(format!("Invalid API base URL: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> OrgCalResult<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                OrgCalError::Service(format!("Request to {} failed: {}", url.path(), e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(OrgCalError::Service(format!(
                "{} returned HTTP {} - {}",
                url.path(),
                status,
                error_body
            )));
        }

        response.json().await.map_err(|e| {
            OrgCalError::Serialization(format!("Failed to parse {} response: {}", url.path(), e))
        })
    }
}

impl CalendarService for GoogleCalendar {
    async fn list_calendars(&self) -> OrgCalResult<Vec<CalendarMetadata>> {
        let list: types::CalendarList = self.get(self.calendar_list_url()?).await?;
        Ok(list.items.into_iter().map(CalendarMetadata::from).collect())
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        window: &FetchWindow,
        page_token: Option<&str>,
    ) -> OrgCalResult<EventPage> {
        let page: types::Events = self
            .get(self.events_url(calendar_id, window, page_token)?)
            .await?;

        Ok(EventPage {
            events: page.items.into_iter().map(EventRecord::from).collect(),
            next_page_token: page.next_page_token,
        })
    }
}
