use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A lead as handed in by a source collaborator. Every field is optional and may
/// hold any JSON scalar; coercion happens in the cleaner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLeadRecord {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub website: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub maps_url: Option<Value>,
    #[serde(default)]
    pub instagram: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
}

impl RawLeadRecord {
    /// Builds a record from a JSON object. Unrecognized keys are ignored.
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A cleaned lead. `name` is never empty; construction goes through the cleaner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalLeadRecord {
    pub name: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub instagram: Option<String>,
    pub maps_url: Option<String>,
    pub source: String,
}

impl CanonicalLeadRecord {
    pub const COLUMNS: [&'static str; 7] = [
        "name",
        "phone",
        "website",
        "address",
        "instagram",
        "maps_url",
        "source",
    ];

    /// Cells in `COLUMNS` order, for tabular consumers.
    pub fn to_row(&self) -> [Option<&str>; 7] {
        [
            Some(self.name.as_str()),
            self.phone.as_deref(),
            self.website.as_deref(),
            self.address.as_deref(),
            self.instagram.as_deref(),
            self.maps_url.as_deref(),
            Some(self.source.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceBatch {
    pub source: String,
    pub records: Vec<RawLeadRecord>,
}

impl SourceBatch {
    pub fn new(source: impl Into<String>, records: Vec<RawLeadRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    /// Parses a JSON array of raw lead objects.
    pub fn from_json_str(source: impl Into<String>, json: &str) -> Result<Self> {
        let records: Vec<RawLeadRecord> = serde_json::from_str(json)?;
        Ok(Self::new(source, records))
    }

    /// Keeps at most `max` records, in order.
    pub fn capped(mut self, max: usize) -> Self {
        self.records.truncate(max);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub source: String,
    pub raw_records: usize,
    pub dropped_records: usize,
    pub cleaned_records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub raw_records: usize,
    pub dropped_records: usize,
    pub cleaned_records: usize,
    pub phone_duplicates: usize,
    pub name_duplicates: usize,
    pub unique_records: usize,
    pub sources: Vec<SourceStats>,
}

impl MergeStats {
    pub fn duplicates_removed(&self) -> usize {
        self.phone_duplicates + self.name_duplicates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub leads: Vec<CanonicalLeadRecord>,
    pub stats: MergeStats,
}
