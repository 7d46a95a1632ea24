use std::fmt::Display;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use orgcal_core::{CalendarAggregator, EventRenderer, FetchWindow};
use tracing::info;

use crate::config::{self, Profile};
use crate::output::OutputTarget;
use crate::providers::google::GoogleCalendar;

pub async fn run(config_path: Option<&Path>, profile_name: &str) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let profile = cfg
        .profile(profile_name)
        .with_context(|| format!("Cannot load calendar profile '{}'", profile_name))?;

    let service = GoogleCalendar::connect(&profile).await?;

    let agenda = match profile.timezone {
        Some(tz) => render(&service, &profile, tz).await?,
        None => render(&service, &profile, Local).await?,
    };

    OutputTarget::from_org_file(profile.org_file.as_deref()).write(&agenda)
}

async fn render<Tz>(service: &GoogleCalendar, profile: &Profile, tz: Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let window = FetchWindow::rolling(Utc::now());
    info!(
        "Fetching {} calendars for '{}' between {} and {}",
        profile.calendars.len(),
        profile.name,
        window.time_min(),
        window.time_max()
    );

    let renderer = EventRenderer::new(tz);
    let aggregator = CalendarAggregator::new(service, renderer, profile.title_filters.clone());

    let doc = aggregator
        .build(&profile.calendars, &window)
        .await
        .with_context(|| format!("Failed to build agenda for '{}'", profile.name))?;

    Ok(doc.into_string())
}
