use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::CrmError;
use crate::models::Lead;

/// Channel assumed when the backend omits it.
pub const DEFAULT_CHANNEL: &str = "whatsapp";

/// Lead as serialized by the CRM backend (`GET /crm/leads`).
///
/// Every field except `id` is decoded leniently: a value of the wrong JSON
/// type becomes "missing" instead of failing the whole list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,

    #[serde(rename = "nome", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(rename = "canal", default, deserialize_with = "lenient_string")]
    pub channel: Option<String>,

    #[serde(rename = "telefone", default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Option<Vec<String>>,

    /// ISO 8601 creation timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub last_contact_at: Option<String>,
}

/// Ids arrive as strings, but numeric ids are accepted too.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "lead id must be a string or number, got {}",
            other
        ))),
    }
}

/// Strings pass through; anything else (null, numbers, objects) is dropped.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => {
            tracing::debug!("Ignoring non-string lead field value: {}", other);
            Ok(None)
        }
    }
}

/// Tag list with non-string entries (e.g. `null`) skipped.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
        )),
        Value::Null => Ok(None),
        other => {
            tracing::debug!("Ignoring non-list tags value: {}", other);
            Ok(None)
        }
    }
}

impl From<LeadRecord> for Lead {
    fn from(record: LeadRecord) -> Self {
        Lead {
            id: record.id,
            name: record.name.unwrap_or_default(),
            channel: record
                .channel
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            phone: record.phone.filter(|p| !p.trim().is_empty()),
            tags: record.tags.unwrap_or_default(),
            created_at: record.created_at.unwrap_or_default(),
            last_contact_at: record.last_contact_at,
        }
    }
}

impl From<&Lead> for LeadRecord {
    fn from(lead: &Lead) -> Self {
        LeadRecord {
            id: lead.id.clone(),
            name: Some(lead.name.clone()),
            channel: Some(lead.channel.clone()),
            phone: lead.phone.clone(),
            tags: Some(lead.tags.clone()),
            created_at: Some(lead.created_at.clone()),
            last_contact_at: lead.last_contact_at.clone(),
        }
    }
}

/// `{ "ok": true, "items": [...] }` response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadListEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub items: Vec<LeadRecord>,
}

/// Lead list payload - either the response envelope or a bare array
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LeadListPayload {
    Envelope(LeadListEnvelope),
    Bare(Vec<LeadRecord>),
}

impl LeadListPayload {
    /// Decode by JSON shape, so a bad record reports its own error instead
    /// of a generic "no variant matched".
    pub fn from_value(value: Value) -> Result<Self, CrmError> {
        match value {
            Value::Object(_) => Ok(LeadListPayload::Envelope(serde_json::from_value(value)?)),
            Value::Array(_) => Ok(LeadListPayload::Bare(serde_json::from_value(value)?)),
            other => Err(CrmError::Parse(format!(
                "expected a lead list object or array, got {}",
                other
            ))),
        }
    }

    /// Convert to a vec of records for uniform processing
    pub fn into_records(self) -> Vec<LeadRecord> {
        match self {
            LeadListPayload::Envelope(envelope) => envelope.items,
            LeadListPayload::Bare(records) => records,
        }
    }
}

/// Decode a lead list from backend JSON.
pub fn parse_lead_list(json: &str) -> Result<Vec<Lead>, CrmError> {
    let value: Value = serde_json::from_str(json)?;
    let payload = LeadListPayload::from_value(value)?;
    let leads: Vec<Lead> = payload.into_records().into_iter().map(Lead::from).collect();
    tracing::debug!("Decoded {} leads", leads.len());
    Ok(leads)
}

/// Encode leads as the backend's response envelope.
pub fn to_envelope(leads: &[Lead]) -> LeadListEnvelope {
    LeadListEnvelope {
        ok: true,
        items: leads.iter().map(LeadRecord::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let json = r#"
        {
            "ok": true,
            "items": [
                {
                    "id": "7f1c",
                    "nome": "Tiago Campos",
                    "canal": "instagram",
                    "telefone": "+55 11 99999-9999",
                    "tags": ["barbearia", "recorrente"],
                    "created_at": "2025-05-01T10:00:00+00:00",
                    "last_contact_at": null
                }
            ]
        }
        "#;

        let leads = parse_lead_list(json).unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Tiago Campos");
        assert_eq!(leads[0].channel, "instagram");
        assert_eq!(leads[0].phone.as_deref(), Some("+55 11 99999-9999"));
        assert_eq!(leads[0].tags, vec!["barbearia", "recorrente"]);
        assert_eq!(leads[0].last_contact_at, None);
    }

    #[test]
    fn test_parse_bare_array_with_missing_fields() {
        let json = r#"[{"id": "a"}, {"id": "b", "canal": "", "nome": null, "telefone": ""}]"#;

        let leads = parse_lead_list(json).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].channel, DEFAULT_CHANNEL);
        assert_eq!(leads[0].created_at, "");
        assert!(leads[0].tags.is_empty());
        assert_eq!(leads[1].name, "");
        assert_eq!(leads[1].channel, DEFAULT_CHANNEL);
        assert_eq!(leads[1].phone, None);
    }

    #[test]
    fn test_bad_fields_degrade_per_record() {
        let json = r#"
        {
            "ok": true,
            "items": [
                {"id": "a", "nome": "Ana", "tags": ["vip", null, 3], "created_at": 1717000000},
                {"id": "b", "nome": "Bruno", "tags": ["quente"], "created_at": "2025-05-01T10:00:00Z"}
            ]
        }
        "#;

        let leads = parse_lead_list(json).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].tags, vec!["vip"]);
        assert_eq!(leads[0].created_at, "");
        assert_eq!(leads[1].name, "Bruno");
        assert_eq!(leads[1].created_at, "2025-05-01T10:00:00Z");
    }

    #[test]
    fn test_bare_array_with_numeric_timestamp() {
        let json = r#"[
            {"id": 7, "canal": 42, "created_at": 1717000000, "last_contact_at": {"at": "x"}, "tags": "vip"},
            {"id": "b", "created_at": "2025-05-01"}
        ]"#;

        let leads = parse_lead_list(json).unwrap();
        assert_eq!(leads[0].id, "7");
        assert_eq!(leads[0].channel, DEFAULT_CHANNEL);
        assert_eq!(leads[0].created_at, "");
        assert_eq!(leads[0].last_contact_at, None);
        assert!(leads[0].tags.is_empty());
        assert_eq!(leads[1].created_at, "2025-05-01");
    }

    #[test]
    fn test_structural_errors_name_the_problem() {
        let err = parse_lead_list(r#"[{"nome": "sem id"}]"#).unwrap_err();
        match err {
            CrmError::Parse(msg) => assert!(msg.contains("id"), "unexpected message: {}", msg),
            other => panic!("Expected parse error, got {:?}", other),
        }

        let err = parse_lead_list("\"leads\"").unwrap_err();
        assert!(matches!(err, CrmError::Parse(_)));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_lead_list("{\"items\": [").unwrap_err();
        assert!(matches!(err, CrmError::Parse(_)));
    }

    #[test]
    fn test_envelope_uses_wire_names() {
        let lead = Lead {
            id: "x".to_string(),
            name: "Ana".to_string(),
            channel: "email".to_string(),
            ..Lead::default()
        };
        let json = serde_json::to_value(to_envelope(&[lead])).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["items"][0]["nome"], "Ana");
        assert_eq!(json["items"][0]["canal"], "email");
    }
}
