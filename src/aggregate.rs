use chrono::{DateTime, Utc};

use crate::models::{CountsSnapshot, Lead, Thresholds};
use crate::recency::age_days;

fn is_cold(age: f64, cold_days: f64) -> bool {
    age >= cold_days
}

fn is_hot(age: f64, hot_days: f64) -> bool {
    age <= hot_days
}

/// Total/cold/hot counts at `now`.
///
/// `total` counts every lead. `cold` and `hot` only count leads whose age
/// resolves, and are independent of each other: with overlapping thresholds
/// a lead can be both.
pub fn counts(leads: &[Lead], thresholds: Thresholds, now: DateTime<Utc>) -> CountsSnapshot {
    let mut snapshot = CountsSnapshot {
        total: leads.len(),
        cold: 0,
        hot: 0,
        cold_days: thresholds.cold_days,
        hot_days: thresholds.hot_days,
    };

    for age in leads.iter().filter_map(|lead| age_days(lead, now)) {
        if is_cold(age, thresholds.cold_days) {
            snapshot.cold += 1;
        }
        if is_hot(age, thresholds.hot_days) {
            snapshot.hot += 1;
        }
    }

    tracing::debug!(
        "Counts: total={}, cold={} (>= {}d), hot={} (<= {}d)",
        snapshot.total,
        snapshot.cold,
        snapshot.cold_days,
        snapshot.hot,
        snapshot.hot_days
    );

    snapshot
}

/// Cold leads, longest without contact first. Leads with no usable
/// timestamp are left out.
pub fn cold_leads(leads: &[Lead], cold_days: f64, now: DateTime<Utc>) -> Vec<&Lead> {
    let mut cold: Vec<(&Lead, f64)> = leads
        .iter()
        .filter_map(|lead| age_days(lead, now).map(|age| (lead, age)))
        .filter(|(_, age)| is_cold(*age, cold_days))
        .collect();

    cold.sort_by(|a, b| b.1.total_cmp(&a.1));
    cold.into_iter().map(|(lead, _)| lead).collect()
}
