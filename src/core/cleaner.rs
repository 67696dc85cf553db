use crate::core::phone::PhoneNormalizer;
use crate::core::url::clean_url;
use crate::domain::model::{CanonicalLeadRecord, RawLeadRecord};
use serde_json::Value;

pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    Cleaned(CanonicalLeadRecord),
    /// The raw record had no usable name.
    Dropped,
}

impl CleanOutcome {
    pub fn into_record(self) -> Option<CanonicalLeadRecord> {
        match self {
            CleanOutcome::Cleaned(record) => Some(record),
            CleanOutcome::Dropped => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, CleanOutcome::Dropped)
    }
}

/// Scalars become their display form; null, arrays and objects count as absent.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn trimmed_text(value: Option<&Value>) -> Option<String> {
    let text = coerce_text(value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadRecordCleaner {
    phone: PhoneNormalizer,
}

impl LeadRecordCleaner {
    pub fn new(phone: PhoneNormalizer) -> Self {
        Self { phone }
    }

    pub fn clean(&self, raw: &RawLeadRecord) -> CleanOutcome {
        let Some(name) = trimmed_text(raw.name.as_ref()) else {
            tracing::debug!("Dropping lead without a name: {:?}", raw);
            return CleanOutcome::Dropped;
        };

        let url = |value: &Option<Value>| coerce_text(value.as_ref()).and_then(|s| clean_url(&s));

        CleanOutcome::Cleaned(CanonicalLeadRecord {
            name,
            phone: coerce_text(raw.phone.as_ref()).and_then(|p| self.phone.normalize(&p)),
            website: url(&raw.website),
            address: trimmed_text(raw.address.as_ref()),
            instagram: url(&raw.instagram),
            maps_url: url(&raw.maps_url),
            source: trimmed_text(raw.source.as_ref())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        })
    }
}
