//! Suggested follow-up per tier, plus the neutral reminder message.
//!
//! Message texts are sent to customers as-is, so they stay in Portuguese.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Lead, Tier};
use crate::scoring::{explain, ScoreBreakdown};
use crate::tiers::tier;

/// Greeting used when the lead has no name.
const ANONYMOUS_GREETING: &str = "tudo bem";

/// What the operator should do next and the message to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextStep {
    pub action: String,
    pub message: String,
}

/// Full decision for one lead: score, tier, reasons and next step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub lead_id: String,
    pub score: u32,
    pub tier: Tier,
    pub breakdown: ScoreBreakdown,
    pub next_step: NextStep,
}

/// First word of the lead's name, or a neutral greeting.
pub fn first_name(lead: &Lead) -> &str {
    lead.name
        .split_whitespace()
        .next()
        .unwrap_or(ANONYMOUS_GREETING)
}

pub fn next_step(lead: &Lead, tier: Tier) -> NextStep {
    let name = first_name(lead);

    match tier {
        Tier::Urgent | Tier::High => NextStep {
            action: "Enviar lembrete de retorno com horários".to_string(),
            message: format!(
                "Oi {}! Tudo certo? 😊\nEssa semana abriu uns horários bem bons.\nQuer que eu te mande as opções?",
                name
            ),
        },
        Tier::Medium => NextStep {
            action: "Reativar conversa (check-in leve)".to_string(),
            message: format!(
                "Oi {}! Passando só pra saber como você está 😊\nSe quiser, posso te mandar horários disponíveis essa semana.",
                name
            ),
        },
        Tier::Low => NextStep {
            action: "Acompanhar e marcar para nova checagem".to_string(),
            message: format!(
                "Oi {}! Tudo certo?\nQuando você quiser, posso te mandar horários disponíveis. 😊",
                name
            ),
        },
    }
}

/// Neutral reminder the operator can copy, independent of tier.
pub fn reminder_message(lead: &Lead) -> String {
    format!(
        "Oi {}! Tudo certo? 😊\nPassando pra te avisar que essa semana tem horários legais disponíveis.\nQuer que eu te mande as opções?",
        first_name(lead)
    )
}

/// Score, explain and pick the next step for a lead at `now`.
pub fn decide(lead: &Lead, now: DateTime<Utc>) -> Decision {
    let breakdown = explain(lead, now);
    let score = breakdown.total();
    let tier = tier(score);

    Decision {
        lead_id: lead.id.clone(),
        score,
        tier,
        next_step: next_step(lead, tier),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use chrono::{Duration, TimeZone};

    fn named(name: &str) -> Lead {
        Lead {
            id: "l1".to_string(),
            name: name.to_string(),
            ..Lead::default()
        }
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name(&named("Tiago Campos")), "Tiago");
        assert_eq!(first_name(&named("  Ana ")), "Ana");
        assert_eq!(first_name(&named("")), "tudo bem");
    }

    #[test]
    fn test_next_step_by_tier() {
        let lead = named("Tiago Campos");

        assert_eq!(next_step(&lead, Tier::Urgent), next_step(&lead, Tier::High));
        assert!(next_step(&lead, Tier::High).action.starts_with("Enviar lembrete"));
        assert!(next_step(&lead, Tier::Medium).action.starts_with("Reativar"));
        assert!(next_step(&lead, Tier::Low).action.starts_with("Acompanhar"));
        assert!(next_step(&lead, Tier::Low).message.starts_with("Oi Tiago!"));
    }

    #[test]
    fn test_reminder_message_anonymous() {
        let msg = reminder_message(&named(""));
        assert!(msg.starts_with("Oi tudo bem!"));
    }

    #[test]
    fn test_decide_agrees_with_score() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let lead = Lead {
            id: "l9".to_string(),
            name: "Bia".to_string(),
            channel: "whatsapp".to_string(),
            tags: vec!["urgente".to_string(), "recorrente".to_string()],
            created_at: (now - Duration::days(10)).to_rfc3339(),
            ..Lead::default()
        };
        let decision = decide(&lead, now);

        assert_eq!(decision.score, score(&lead, now));
        assert_eq!(decision.score, 65);
        assert_eq!(decision.tier, Tier::High);
        assert_eq!(decision.lead_id, "l9");
        assert!(decision.next_step.message.starts_with("Oi Bia!"));
    }
}
