//! Org timestamps for event start/end pairs.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::event::EventTime;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %a %H:%M";
const TIME_FORMAT: &str = "%H:%M";

/// Render an event's start/end as an org timestamp or range.
///
/// - all-day: `<2025-03-20>` or `<2025-03-20>--<2025-03-22>`; the service's
///   end date is exclusive, so one day is taken off before comparing
/// - timed, same local day: `<2025-03-20 Thu 15:00-16:00>`
/// - timed, spanning days: `<2025-03-20 Thu 23:00>--<2025-03-21 Fri 01:00>`
///
/// Timed values are shown in `tz`. Values that fail to parse are rendered
/// as the zero time rather than aborting the run. A missing start renders
/// as a bare newline.
pub fn format_range<Tz>(start: Option<&EventTime>, end: Option<&EventTime>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match start {
        None => "\n".to_string(),
        Some(EventTime::Date(start)) => format_all_day(start, end),
        Some(EventTime::DateTime(start)) => format_timed(start, end, tz),
    }
}

fn format_all_day(start: &str, end: Option<&EventTime>) -> String {
    let start = parse_date(start);
    let start_fmt = start.format(DATE_FORMAT);

    let Some(end) = end else {
        return format!("<{start_fmt}>");
    };

    let end_date = match end {
        EventTime::Date(d) => parse_date(d),
        EventTime::DateTime(_) => zero_time().date_naive(),
    };
    let last_day = end_date.pred_opt().unwrap_or_else(|| zero_time().date_naive());

    if last_day == start {
        format!("<{start_fmt}>")
    } else {
        format!("<{start_fmt}>--<{}>", last_day.format(DATE_FORMAT))
    }
}

fn format_timed<Tz>(start: &str, end: Option<&EventTime>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = parse_date_time(start).with_timezone(tz);
    let start_fmt = start.format(DATE_TIME_FORMAT);

    let Some(end) = end else {
        return format!("<{start_fmt}>");
    };

    let end = match end {
        EventTime::DateTime(dt) => parse_date_time(dt),
        EventTime::Date(_) => zero_time(),
    }
    .with_timezone(tz);

    if end.date_naive() == start.date_naive() {
        format!("<{start_fmt}-{}>", end.format(TIME_FORMAT))
    } else {
        format!("<{start_fmt}>--<{}>", end.format(DATE_TIME_FORMAT))
    }
}

/// 0001-01-01T00:00:00Z, what unreadable timestamps degrade to.
fn zero_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_else(|e| {
        tracing::debug!("Unreadable date {:?}: {}", s, e);
        zero_time().date_naive()
    })
}

fn parse_date_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            tracing::debug!("Unreadable timestamp {:?}: {}", s, e);
            zero_time()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{Europe::Copenhagen, UTC};

    fn date(s: &str) -> EventTime {
        EventTime::Date(s.to_string())
    }

    fn date_time(s: &str) -> EventTime {
        EventTime::DateTime(s.to_string())
    }

    #[test]
    fn test_missing_start() {
        assert_eq!(format_range(None, Some(&date("2025-03-21")), &UTC), "\n");
        assert_eq!(format_range(None, None, &UTC), "\n");
    }

    #[test]
    fn test_single_all_day_event() {
        let out = format_range(Some(&date("2025-03-20")), Some(&date("2025-03-21")), &UTC);
        assert_eq!(out, "<2025-03-20>");
    }

    #[test]
    fn test_all_day_without_end() {
        let out = format_range(Some(&date("2025-03-20")), None, &UTC);
        assert_eq!(out, "<2025-03-20>");
    }

    #[test]
    fn test_multi_day_all_day_event() {
        let out = format_range(Some(&date("2025-03-20")), Some(&date("2025-03-23")), &UTC);
        assert_eq!(out, "<2025-03-20>--<2025-03-22>");
    }

    #[test]
    fn test_all_day_across_month_end() {
        let out = format_range(Some(&date("2025-02-27")), Some(&date("2025-03-01")), &UTC);
        assert_eq!(out, "<2025-02-27>--<2025-02-28>");
    }

    #[test]
    fn test_timed_same_day() {
        let out = format_range(
            Some(&date_time("2025-03-20T15:00:00Z")),
            Some(&date_time("2025-03-20T16:30:00Z")),
            &UTC,
        );
        assert_eq!(out, "<2025-03-20 Thu 15:00-16:30>");
    }

    #[test]
    fn test_timed_without_end() {
        let out = format_range(Some(&date_time("2025-03-20T15:00:00Z")), None, &UTC);
        assert_eq!(out, "<2025-03-20 Thu 15:00>");
    }

    #[test]
    fn test_timed_crossing_midnight() {
        let out = format_range(
            Some(&date_time("2025-03-20T23:00:00Z")),
            Some(&date_time("2025-03-21T01:00:00Z")),
            &UTC,
        );
        assert_eq!(out, "<2025-03-20 Thu 23:00>--<2025-03-21 Fri 01:00>");
    }

    #[test]
    fn test_timed_converted_to_display_zone() {
        // 22:30-23:30 UTC is 23:30-00:30 in Copenhagen (CET, +01:00)
        let out = format_range(
            Some(&date_time("2025-03-20T22:30:00Z")),
            Some(&date_time("2025-03-20T23:30:00Z")),
            &Copenhagen,
        );
        assert_eq!(out, "<2025-03-20 Thu 23:30>--<2025-03-21 Fri 00:30>");
    }

    #[test]
    fn test_timed_with_offset_input() {
        let out = format_range(
            Some(&date_time("2025-07-01T09:00:00+02:00")),
            Some(&date_time("2025-07-01T10:00:00+02:00")),
            &UTC,
        );
        assert_eq!(out, "<2025-07-01 Tue 07:00-08:00>");
    }

    #[test]
    fn test_same_day_of_month_in_different_months_is_a_range() {
        let out = format_range(
            Some(&date_time("2025-03-20T10:00:00Z")),
            Some(&date_time("2025-04-20T11:00:00Z")),
            &UTC,
        );
        assert_eq!(out, "<2025-03-20 Thu 10:00>--<2025-04-20 Sun 11:00>");
    }

    #[test]
    fn test_malformed_start_degrades_to_zero_time() {
        let out = format_range(Some(&date_time("not a time")), None, &UTC);
        assert_eq!(out, "<0001-01-01 Mon 00:00>");

        let out = format_range(Some(&date("20/03/2025")), None, &UTC);
        assert_eq!(out, "<0001-01-01>");
    }

    #[test]
    fn test_malformed_end_does_not_abort() {
        let out = format_range(
            Some(&date_time("2025-03-20T15:00:00Z")),
            Some(&date_time("garbage")),
            &UTC,
        );
        assert_eq!(out, "<2025-03-20 Thu 15:00>--<0001-01-01 Mon 00:00>");
    }

    #[test]
    fn test_all_day_end_at_earliest_date_does_not_abort() {
        let out = format_range(Some(&date("2025-03-20")), Some(&date("-262143-01-01")), &UTC);
        assert_eq!(out, "<2025-03-20>--<0001-01-01>");
    }
}
