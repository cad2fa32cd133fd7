use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Elapsed time between two instants, decomposed into hours, minutes
/// and raw seconds.
///
/// Only the sub-day remainder of the difference is kept: a 26 hour
/// span reports 2 hours, and `total_seconds` is likewise the remainder
/// within the day. Incidents are assumed to resolve within 24 hours;
/// spans at or past a day boundary lose the whole days. Spans where
/// the end precedes the start wrap modulo 24 hours the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub hours: i64,
    pub minutes: i64,
    pub total_seconds: i64,
}

impl DurationBreakdown {
    pub fn between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        let day_seconds = end
            .signed_duration_since(start)
            .num_seconds()
            .rem_euclid(SECONDS_PER_DAY);

        Self {
            hours: day_seconds / 3600,
            minutes: (day_seconds / 60) % 60,
            total_seconds: day_seconds,
        }
    }

    pub fn format_hm(&self) -> String {
        format!("{} hours, {} minutes", self.hours, self.minutes)
    }
}

/// Parses a tracker timestamp.
///
/// Accepts RFC 3339 ("2024-01-01T10:00:00Z") as well as the tracker's
/// own rendering with a colon-less offset ("2024-01-01T10:00:00.000+0000").
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

/// Formats an already-summed seconds total as "H hours, M minutes".
///
/// Totals are floor-divided from the raw sum, so unlike the per-span
/// breakdown the hour component here does carry across day boundaries.
pub fn format_total(total_seconds: i64) -> String {
    let hours = total_seconds.div_euclid(3600);
    let minutes = total_seconds.div_euclid(60).rem_euclid(60);
    format!("{hours} hours, {minutes} minutes")
}
