//! Score-ordered views over a lead list.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

use crate::models::{Lead, Tier};
use crate::scoring::score;
use crate::tiers::tier;

/// Size of the "top priorities" panel.
pub const DEFAULT_TOP_N: usize = 3;

/// A lead with its score and tier at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredLead<'a> {
    pub lead: &'a Lead,
    pub score: u32,
    pub tier: Tier,
}

/// One slot of the top priorities panel.
///
/// The panel always has exactly `n` slots. When there are fewer leads than
/// slots, the remainder are placeholders: no lead, score 0, tier `Low`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityEntry<'a> {
    pub lead: Option<&'a Lead>,
    pub score: u32,
    pub tier: Tier,
}

impl<'a> PriorityEntry<'a> {
    pub fn placeholder() -> Self {
        Self {
            lead: None,
            score: 0,
            tier: Tier::Low,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.lead.is_none()
    }

    /// Lead id, empty for placeholders.
    pub fn lead_id(&self) -> &str {
        self.lead.map(|l| l.id.as_str()).unwrap_or("")
    }
}

impl<'a> From<ScoredLead<'a>> for PriorityEntry<'a> {
    fn from(scored: ScoredLead<'a>) -> Self {
        Self {
            lead: Some(scored.lead),
            score: scored.score,
            tier: scored.tier,
        }
    }
}

/// Every lead, highest score first. Equal scores keep their input order.
pub fn rank(leads: &[Lead], now: DateTime<Utc>) -> Vec<ScoredLead<'_>> {
    let mut scored: Vec<ScoredLead<'_>> = leads
        .iter()
        .map(|lead| {
            let score = score(lead, now);
            ScoredLead {
                lead,
                score,
                tier: tier(score),
            }
        })
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|s| Reverse(s.score));
    scored
}

/// The `n` most urgent leads, padded with placeholders to exactly `n` entries.
pub fn top_priorities(leads: &[Lead], n: usize, now: DateTime<Utc>) -> Vec<PriorityEntry<'_>> {
    let mut top: Vec<PriorityEntry<'_>> = rank(leads, now)
        .into_iter()
        .take(n)
        .map(PriorityEntry::from)
        .collect();

    top.resize_with(n, PriorityEntry::placeholder);
    top
}

/// How many slots of a panel are placeholders.
pub fn missing_count(entries: &[PriorityEntry<'_>]) -> usize {
    entries.iter().filter(|e| e.is_placeholder()).count()
}
