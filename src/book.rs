//! Caller-owned lead state.
//!
//! `LeadBook` holds the lead list a dashboard would otherwise keep in a
//! global. The engine functions never see the book, only the `&[Lead]`
//! snapshot returned by [`LeadBook::leads`].

use chrono::{DateTime, SecondsFormat, Utc};
use phonenumber::country::Id as CountryId;
use phonenumber::Mode;
use uuid::Uuid;

use crate::errors::{CrmError, ResultExt};
use crate::models::{Interaction, Lead};
use crate::wire::DEFAULT_CHANNEL;

/// Interaction kinds that count as contact with the lead.
pub const CONTACT_KINDS: [&str; 4] = ["mensagem_enviada", "resposta", "agendamento", "compra"];

/// Input for [`LeadBook::create_lead`].
#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub name: String,
    pub channel: String,
    pub phone: Option<String>,
    pub tags: Vec<String>,
}

impl NewLead {
    /// Build from raw form values, with tags typed as a comma-separated list.
    pub fn from_form(name: &str, channel: &str, phone: &str, tag_input: &str) -> Self {
        Self {
            name: name.to_string(),
            channel: channel.to_string(),
            phone: Some(phone.to_string()),
            tags: tag_input.split(',').map(str::to_string).collect(),
        }
    }
}

/// Normalize a Brazilian phone number to E.164 (`+5511987654321`).
///
/// Returns `None` when the number does not parse or is not a valid BR number.
pub fn normalize_br_phone(raw: &str) -> Option<String> {
    if raw.trim().len() < 8 {
        return None;
    }

    match phonenumber::parse(Some(CountryId::BR), raw) {
        Ok(number) if phonenumber::is_valid(&number) => {
            Some(number.format().mode(Mode::E164).to_string())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Failed to parse BR phone '{}': {:?}", raw, e);
            None
        }
    }
}

/// In-memory lead list plus interaction log.
#[derive(Debug, Clone, Default)]
pub struct LeadBook {
    leads: Vec<Lead>,
    interactions: Vec<Interaction>,
}

impl LeadBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a list fetched elsewhere (e.g. decoded with [`crate::wire::parse_lead_list`]).
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self {
            leads,
            interactions: Vec::new(),
        }
    }

    /// Validate and store a new lead created at `now`.
    pub fn create_lead(&mut self, input: NewLead, now: DateTime<Utc>) -> Result<&Lead, CrmError> {
        let name = input.name.trim();
        if name.is_empty() {
            tracing::warn!("Rejected lead without a name");
            return Err(CrmError::BadRequest("Lead name is required".to_string()));
        }

        let channel = match input.channel.trim() {
            "" => DEFAULT_CHANNEL.to_string(),
            c => c.to_lowercase(),
        };

        let phone = input
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| match normalize_br_phone(&p) {
                Some(normalized) => normalized,
                None => {
                    tracing::debug!("Keeping phone as typed (not a valid BR number): {}", p);
                    p
                }
            });

        let tags = input
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            channel,
            phone,
            tags,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            last_contact_at: None,
        };

        tracing::info!("Lead created: {} ({})", lead.id, lead.channel);
        self.leads.push(lead);
        Ok(&self.leads[self.leads.len() - 1])
    }

    fn position(&self, lead_id: &str) -> Result<usize, CrmError> {
        self.leads
            .iter()
            .position(|l| l.id == lead_id)
            .ok_or_else(|| CrmError::NotFound(format!("Lead {} not found", lead_id)))
    }

    pub fn get(&self, lead_id: &str) -> Result<&Lead, CrmError> {
        self.position(lead_id).map(|idx| &self.leads[idx])
    }

    /// Snapshot handed to the engine.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Log an interaction. Contact kinds (see [`CONTACT_KINDS`]) move the
    /// lead's `last_contact_at` to `now`.
    pub fn record_interaction(
        &mut self,
        lead_id: &str,
        kind: &str,
        note: &str,
        now: DateTime<Utc>,
    ) -> Result<Interaction, CrmError> {
        let idx = self
            .position(lead_id)
            .with_context(|| format!("Recording '{}' interaction", kind))?;

        let interaction = Interaction {
            id: Uuid::new_v4(),
            lead_id: lead_id.to_string(),
            kind: kind.to_string(),
            note: note.trim().to_string(),
            at: now,
        };

        if CONTACT_KINDS.contains(&kind) {
            self.leads[idx].last_contact_at = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
            tracing::info!("Lead {}: last contact updated by '{}'", lead_id, kind);
        }

        self.interactions.push(interaction.clone());
        Ok(interaction)
    }

    /// Interactions of one lead, oldest first.
    pub fn interactions_for(&self, lead_id: &str) -> Vec<&Interaction> {
        self.interactions
            .iter()
            .filter(|i| i.lead_id == lead_id)
            .collect()
    }
}
