//! Lead Prioritization Library
//!
//! Turns CRM lead records into dashboard view-model values: a recency-weighted
//! urgency score per lead, its tier, a fixed-size "top priorities" panel,
//! cold/hot population counts and a search predicate.
//!
//! Every engine function is a pure function of its arguments, including the
//! current instant `now`. Nothing is cached between calls; callers own the lead
//! list (see `book::LeadBook`) and recompute on load, refresh or input change.
//!
//! # Modules
//!
//! - `recency`: Timestamp parsing and lead age in days.
//! - `scoring`: Urgency score model and score explanations.
//! - `tiers`: Score → tier classification.
//! - `ranking`: Score ordering and the top priorities panel.
//! - `aggregate`: Total/cold/hot counts and the cold lead list.
//! - `search`: Text filter over name, channel and tags.
//! - `playbook`: Next step and reminder messages per tier.
//! - `dashboard`: One-shot recomputation of everything the dashboard shows.
//! - `book`: Caller-owned lead list and interaction log.
//! - `wire`: Backend JSON lead records.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `models`: Core data models.

pub mod aggregate;
pub mod book;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod playbook;
pub mod ranking;
pub mod recency;
pub mod scoring;
pub mod search;
pub mod tiers;
pub mod wire;

pub use models::{CountsSnapshot, Interaction, Lead, ScoreResult, Thresholds, Tier};
