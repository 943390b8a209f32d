use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::counts;
use crate::models::{CountsSnapshot, Lead, ScoreResult, Thresholds};
use crate::ranking::{missing_count, top_priorities, PriorityEntry, DEFAULT_TOP_N};
use crate::scoring::score_lead;
use crate::search::filter;

/// Knobs for one dashboard recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardOptions {
    pub thresholds: Thresholds,
    pub top_n: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// A lead row with its score.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardRow<'a> {
    pub lead: &'a Lead,
    pub result: ScoreResult,
}

/// Everything the dashboard renders, computed at a single instant.
///
/// `rows` follow the search query; `top_priorities` and `counts` always
/// cover the whole list.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub generated_at: DateTime<Utc>,
    pub query: String,
    pub rows: Vec<DashboardRow<'a>>,
    pub top_priorities: Vec<PriorityEntry<'a>>,
    /// Placeholder slots in `top_priorities`.
    pub missing_priorities: usize,
    pub counts: CountsSnapshot,
}

impl<'a> DashboardView<'a> {
    pub fn compute(
        leads: &'a [Lead],
        query: &str,
        options: &DashboardOptions,
        now: DateTime<Utc>,
    ) -> Self {
        let rows: Vec<DashboardRow<'a>> = filter(leads, query)
            .into_iter()
            .map(|lead| DashboardRow {
                lead,
                result: score_lead(lead, now),
            })
            .collect();

        let top = top_priorities(leads, options.top_n, now);
        let missing = missing_count(&top);

        tracing::debug!(
            "Dashboard recomputed: {} of {} leads shown, {} placeholder priorities",
            rows.len(),
            leads.len(),
            missing
        );

        DashboardView {
            generated_at: now,
            query: query.trim().to_string(),
            rows,
            top_priorities: top,
            missing_priorities: missing,
            counts: counts(leads, options.thresholds, now),
        }
    }
}
