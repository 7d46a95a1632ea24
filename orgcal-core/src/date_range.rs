//! Time window events are fetched in.

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};

/// Months before the anchor the window opens.
const MONTHS_BACK: u32 = 9;
/// Months after the anchor the window closes.
const MONTHS_AHEAD: u32 = 12;

/// Closed range of instants passed to the service as `timeMin`/`timeMax`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl FetchWindow {
    /// Rolling window anchored at tomorrow's midnight (UTC):
    /// nine months back, twelve months ahead.
    pub fn rolling(now: DateTime<Utc>) -> Self {
        let anchor = (now + Duration::days(1))
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();

        FetchWindow {
            from: anchor
                .checked_sub_months(Months::new(MONTHS_BACK))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            to: anchor
                .checked_add_months(Months::new(MONTHS_AHEAD))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// `from` in the `YYYY-MM-DDTHH:MM:SSZ` form the API expects.
    pub fn time_min(&self) -> String {
        self.from.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// `to` in the `YYYY-MM-DDTHH:MM:SSZ` form the API expects.
    pub fn time_max(&self) -> String {
        self.to.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}
