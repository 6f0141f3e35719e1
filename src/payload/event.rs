//! Calendar events as an iCalendar `VEVENT` block

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Calendar event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRequest {
    /// Event summary
    pub title: String,
    /// Venue
    pub location: String,
    /// Start date/time text (RFC 3339, or a naive date/time taken as UTC)
    pub start: String,
    /// End date/time text, same formats as `start`
    pub end: String,
    /// Free-form description
    pub description: String,
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub(super) fn encode(request: &EventRequest) -> Option<String> {
    if request.title.is_empty() {
        return None;
    }

    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{}", request.title),
        format!("LOCATION:{}", request.location),
    ];
    if let Some(start) = format_event_timestamp(&request.start) {
        lines.push(format!("DTSTART:{start}"));
    }
    if let Some(end) = format_event_timestamp(&request.end) {
        lines.push(format!("DTEND:{end}"));
    }
    if !request.description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", request.description));
    }
    lines.push("END:VEVENT".to_string());

    Some(lines.join("\n"))
}

/// Convert date text to the iCalendar UTC basic form `YYYYMMDDTHHMMSSZ`.
///
/// Returns `None` for blank or unparseable input; fractional seconds are
/// dropped.
pub fn format_event_timestamp(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = parse_utc(input);
    if parsed.is_none() {
        tracing::debug!(input, "Dropping unparseable event date");
    }
    parsed.map(|timestamp| timestamp.format("%Y%m%dT%H%M%SZ").to_string())
}

fn parse_utc(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
