use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============ Source Records ============

/// A lead as the prioritization engine sees it.
///
/// Timestamps are kept exactly as received; they may be malformed and are
/// only parsed when an age is needed (see [`crate::recency`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name, may be empty.
    pub name: String,
    /// Acquisition channel (e.g. "whatsapp", "instagram"), compared case-insensitively.
    pub channel: String,
    /// Phone number, as typed or normalized to E.164.
    pub phone: Option<String>,
    /// Free-form tags. Order only matters for display.
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Most recent contact timestamp, if any.
    pub last_contact_at: Option<String>,
}

/// A logged touchpoint with a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique identifier.
    pub id: Uuid,
    /// Lead the interaction belongs to.
    pub lead_id: String,
    /// Interaction kind (e.g. "mensagem_enviada", "resposta", "nota").
    pub kind: String,
    /// Free-form operator note.
    pub note: String,
    /// When the interaction happened.
    pub at: DateTime<Utc>,
}

// ============ Derived Values ============

/// Urgency tier, ordered `Low < Medium < High < Urgent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
    Urgent,
}


/// Score and tier for one lead at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    /// Lead the score belongs to.
    pub lead_id: String,
    /// Non-negative urgency score.
    pub score: u32,
    /// Tier derived from `score`.
    pub tier: Tier,
}

/// Default age (days) at or above which a lead counts as cold.
pub const DEFAULT_COLD_DAYS: f64 = 30.0;
/// Default age (days) at or below which a lead counts as hot.
pub const DEFAULT_HOT_DAYS: f64 = 7.0;

/// Cold/hot age thresholds in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub cold_days: f64,
    pub hot_days: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cold_days: DEFAULT_COLD_DAYS,
            hot_days: DEFAULT_HOT_DAYS,
        }
    }
}

/// Population counts together with the thresholds that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountsSnapshot {
    /// Every lead in the input, dated or not.
    pub total: usize,
    /// Leads with a resolvable age `>= cold_days`.
    pub cold: usize,
    /// Leads with a resolvable age `<= hot_days`.
    pub hot: usize,
    pub cold_days: f64,
    pub hot_days: f64,
}
