//! Urgency score model.
//!
//! ```text
//! score = round_half_up(age_days × 3 + tag_bonus + channel_bonus)
//! ```
//!
//! Age grows with `now`, so the same lead scores higher the longer it goes
//! without contact. Scores are comparable only when computed at the same
//! instant; callers pass one `now` per recomputation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::models::{Lead, ScoreResult};
use crate::recency::{age_days, scoring_age};
use crate::tiers::tier;

/// Points per day without contact.
pub const AGE_WEIGHT: f64 = 3.0;

/// Bonus points per tag, matched case-insensitively.
pub const TAG_BONUSES: [(&str, u32); 5] = [
    ("urgente", 25),
    ("vip", 15),
    ("recorrente", 10),
    ("barbearia", 8),
    ("quente", 6),
];

/// Channel that earns [`CHANNEL_BONUS`].
pub const BONUS_CHANNEL: &str = "instagram";
/// Bonus points for leads that arrived through [`BONUS_CHANNEL`].
pub const CHANNEL_BONUS: u32 = 3;

/// Bonus tags present on the lead, in table order. Each tag counts once no
/// matter how often it is repeated.
pub fn matched_bonus_tags(tags: &[String]) -> Vec<(&'static str, u32)> {
    let present: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();

    TAG_BONUSES
        .iter()
        .filter(|(tag, _)| present.contains(*tag))
        .copied()
        .collect()
}

/// Sum of all bonus tag points.
pub fn tag_bonus(tags: &[String]) -> u32 {
    matched_bonus_tags(tags).iter().map(|(_, points)| points).sum()
}

pub fn channel_bonus(channel: &str) -> u32 {
    if channel.eq_ignore_ascii_case(BONUS_CHANNEL) {
        CHANNEL_BONUS
    } else {
        0
    }
}

/// Round half up, floored at zero.
///
/// Negative totals only happen for timestamps in the future; they score 0.
fn round_score(raw: f64) -> u32 {
    let rounded = (raw + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Urgency score of a lead at `now`.
pub fn score(lead: &Lead, now: DateTime<Utc>) -> u32 {
    let raw = scoring_age(lead, now) * AGE_WEIGHT
        + tag_bonus(&lead.tags) as f64
        + channel_bonus(&lead.channel) as f64;
    round_score(raw)
}

/// Score plus tier, tagged with the lead id.
pub fn score_lead(lead: &Lead, now: DateTime<Utc>) -> ScoreResult {
    let score = score(lead, now);
    ScoreResult {
        lead_id: lead.id.clone(),
        score,
        tier: tier(score),
    }
}

/// Per-term view of a score, for showing the operator why a lead ranks where it does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Resolved age, `None` when no timestamp parsed.
    pub age_days: Option<f64>,
    /// `age × AGE_WEIGHT` (0 when the age is unresolved).
    pub age_points: f64,
    /// Matched bonus tags with their points.
    pub tag_points: Vec<(String, u32)>,
    pub channel_points: u32,
    /// Human-readable reasons, one per contributing term.
    pub reasons: Vec<String>,
}

impl ScoreBreakdown {
    /// Rounded total; always equal to [`score`] for the same lead and instant.
    pub fn total(&self) -> u32 {
        let tags: u32 = self.tag_points.iter().map(|(_, p)| p).sum();
        round_score(self.age_points + tags as f64 + self.channel_points as f64)
    }
}

fn tag_reason(tag: &str) -> &'static str {
    match tag {
        "urgente" => "tag: urgente (marcado como urgente)",
        "vip" => "tag: vip (prioridade)",
        "recorrente" => "tag: recorrente (alto LTV)",
        "barbearia" => "tag: barbearia (serviço recorrente)",
        "quente" => "tag: quente (intenção)",
        _ => "tag",
    }
}

/// Explain the score of a lead at `now`.
pub fn explain(lead: &Lead, now: DateTime<Utc>) -> ScoreBreakdown {
    let age = age_days(lead, now);
    let age_points = age.unwrap_or(0.0) * AGE_WEIGHT;
    let mut reasons = Vec::new();

    match age {
        Some(days) if days < 0.0 => reasons.push("contato agendado/futuro".to_string()),
        Some(days) => reasons.push(format!("{:.0} dias sem contato", days.floor())),
        None => reasons.push("sem data de contato válida".to_string()),
    }

    let tag_points: Vec<(String, u32)> = matched_bonus_tags(&lead.tags)
        .into_iter()
        .map(|(tag, points)| {
            reasons.push(tag_reason(tag).to_string());
            (tag.to_string(), points)
        })
        .collect();

    let channel_points = channel_bonus(&lead.channel);
    if channel_points > 0 {
        reasons.push("canal: Instagram".to_string());
    }

    ScoreBreakdown {
        age_days: age,
        age_points,
        tag_points,
        channel_points,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn lead(channel: &str, tags: &[&str], age: Duration) -> Lead {
        Lead {
            id: "l1".to_string(),
            name: "Tiago Campos".to_string(),
            channel: channel.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: (now() - age).to_rfc3339(),
            ..Lead::default()
        }
    }

    #[test]
    fn test_reference_lead_scores_high() {
        let l = lead("whatsapp", &["urgente", "recorrente"], Duration::days(10));
        let result = score_lead(&l, now());

        assert_eq!(result.score, 65);
        assert_eq!(result.tier, Tier::High);
        assert_eq!(result.lead_id, "l1");
    }

    #[test]
    fn test_instagram_fresh_lead() {
        let l = lead("Instagram", &[], Duration::zero());
        let result = score_lead(&l, now());

        assert_eq!(result.score, 3);
        assert_eq!(result.tier, Tier::Low);
    }

    #[test]
    fn test_duplicate_and_mixed_case_tags_count_once() {
        let l = lead("email", &["VIP", "vip", "Vip", "desconhecida"], Duration::zero());
        assert_eq!(score(&l, now()), 15);
    }

    #[test]
    fn test_round_half_up() {
        // 0.5 days → 1.5 points → rounds to 2
        let l = lead("email", &[], Duration::hours(12));
        assert_eq!(score(&l, now()), 2);

        // 1.5 days → 4.5 points → rounds to 5
        let l = lead("email", &[], Duration::hours(36));
        assert_eq!(score(&l, now()), 5);

        // 0.25 days → 0.75 points → rounds to 1
        let l = lead("email", &[], Duration::hours(6));
        assert_eq!(score(&l, now()), 1);
    }

    #[test]
    fn test_future_timestamp_floors_at_zero() {
        let l = lead("email", &["quente"], -Duration::days(5));
        assert_eq!(score(&l, now()), 0);
    }

    #[test]
    fn test_unparseable_dates_score_bonuses_only() {
        let mut l = lead("instagram", &["barbearia"], Duration::zero());
        l.created_at = "invalid".to_string();
        l.last_contact_at = Some("also invalid".to_string());

        assert_eq!(score(&l, now()), 11);
    }

    #[test]
    fn test_explain_matches_score() {
        let l = lead("instagram", &["quente", "vip", "x"], Duration::hours(80));
        let breakdown = explain(&l, now());

        assert_eq!(breakdown.total(), score(&l, now()));
        assert_eq!(
            breakdown.tag_points,
            vec![("vip".to_string(), 15), ("quente".to_string(), 6)]
        );
        assert_eq!(breakdown.channel_points, 3);
        assert_eq!(breakdown.reasons[0], "3 dias sem contato");
        assert_eq!(breakdown.reasons.len(), 4);
    }

    #[test]
    fn test_explain_unresolved_age() {
        let mut l = lead("email", &[], Duration::zero());
        l.created_at = String::new();
        let breakdown = explain(&l, now());

        assert_eq!(breakdown.age_days, None);
        assert_eq!(breakdown.age_points, 0.0);
        assert_eq!(breakdown.reasons, vec!["sem data de contato válida".to_string()]);
    }

    #[test]
    fn test_explain_scheduled_contact() {
        let l = lead("email", &["vip"], -Duration::hours(30));
        let breakdown = explain(&l, now());

        assert!(breakdown.age_days.is_some_and(|d| d < 0.0));
        assert_eq!(breakdown.reasons[0], "contato agendado/futuro");
        assert!(!breakdown.reasons.iter().any(|r| r.contains("dias sem contato")));
        assert_eq!(breakdown.total(), score(&l, now()));
    }
}
