//! Lead age in days, from the most recent usable timestamp.
//!
//! `now` is always passed in. An age is only meaningful for the instant it
//! was computed at, so callers recompute instead of caching.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::Lead;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Parse a timestamp string to `DateTime<Utc>`.
///
/// Accepts RFC 3339 first, then `YYYY-MM-DD HH:MM:SS[.f] ±zzzz`, naive
/// datetimes (assumed UTC, `T` or space separated) and plain dates at
/// midnight UTC. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %z")
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
}

/// The instant recency is measured from: `last_contact_at` when it parses,
/// otherwise `created_at`, otherwise nothing.
pub fn contact_instant(lead: &Lead) -> Option<DateTime<Utc>> {
    if let Some(raw) = lead.last_contact_at.as_deref() {
        match parse_timestamp(raw) {
            Some(at) => return Some(at),
            None => tracing::debug!(
                "Lead {}: unparseable last_contact_at '{}', falling back to created_at",
                lead.id,
                raw
            ),
        }
    }

    let created = parse_timestamp(&lead.created_at);
    if created.is_none() {
        tracing::debug!(
            "Lead {}: unparseable created_at '{}', age unresolved",
            lead.id,
            lead.created_at
        );
    }
    created
}

/// Days elapsed between the lead's contact instant and `now`.
///
/// Fractional and unclamped: a timestamp in the future gives a negative age.
/// `None` when neither timestamp parses.
pub fn age_days(lead: &Lead, now: DateTime<Utc>) -> Option<f64> {
    contact_instant(lead).map(|at| (now - at).num_milliseconds() as f64 / MILLIS_PER_DAY)
}

/// Age used by the score model; an unresolved age counts as zero.
pub fn scoring_age(lead: &Lead, now: DateTime<Utc>) -> f64 {
    age_days(lead, now).unwrap_or(0.0)
}
