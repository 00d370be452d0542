use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::ledger::constants::config::TIMESTAMP_FORMAT;

// Parses an IANA time zone name, e.g. "America/Port-au-Prince".
pub fn parse_time_zone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

// Renders a UTC timestamp in the given time zone.
pub fn format_timestamp(timestamp: &DateTime<Utc>, time_zone: Tz) -> String {
    timestamp
        .with_timezone(&time_zone)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
