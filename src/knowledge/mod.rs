//! Crop Knowledge Store
//!
//! Immutable mapping from a normalized crop name to its growing requirements.
//! Built once from a literal table and shared by every request; readers never
//! need a lock.
//!
//! A miss is not an error. It is the common signal that sends a request on
//! to the generation tier.

mod crops;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static BUILTIN: Lazy<KnowledgeStore> = Lazy::new(|| KnowledgeStore::from_records(crops::CROPS));

/// One crop's growing requirements, grouped into four fixed categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeRecord {
    /// Normalized (lowercase, trimmed) crop name
    pub name: &'static str,
    pub soil_requirements: &'static [&'static str],
    pub climate_requirements: &'static [&'static str],
    pub growing_tips: &'static [&'static str],
    pub harvest_info: &'static [&'static str],
}

impl KnowledgeRecord {
    /// Owned copy of the four categories
    pub fn to_requirements(&self) -> CropRequirements {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        CropRequirements {
            soil_requirements: owned(self.soil_requirements),
            climate_requirements: owned(self.climate_requirements),
            growing_tips: owned(self.growing_tips),
            harvest_info: owned(self.harvest_info),
        }
    }
}

/// Growing requirements in the shape returned to callers, whichever tier
/// produced them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRequirements {
    #[serde(default)]
    pub soil_requirements: Vec<String>,
    #[serde(default)]
    pub climate_requirements: Vec<String>,
    #[serde(default)]
    pub growing_tips: Vec<String>,
    #[serde(default)]
    pub harvest_info: Vec<String>,
}

impl CropRequirements {
    /// True when no category has any entry
    pub fn is_empty(&self) -> bool {
        self.soil_requirements.is_empty()
            && self.climate_requirements.is_empty()
            && self.growing_tips.is_empty()
            && self.harvest_info.is_empty()
    }

    /// Total entries across all categories
    pub fn len(&self) -> usize {
        self.soil_requirements.len()
            + self.climate_requirements.len()
            + self.growing_tips.len()
            + self.harvest_info.len()
    }
}

/// Read-only crop lookup table
#[derive(Debug)]
pub struct KnowledgeStore {
    records: &'static [KnowledgeRecord],
    index: HashMap<&'static str, usize>,
}

impl KnowledgeStore {
    /// The process-wide built-in store
    pub fn builtin() -> &'static KnowledgeStore {
        &BUILTIN
    }

    /// Build a store over a static record table
    pub fn from_records(records: &'static [KnowledgeRecord]) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.name, i))
            .collect();
        Self { records, index }
    }

    /// Look up a crop by name.
    ///
    /// The name is trimmed and lowercased first; matching is exact after
    /// that. Returns `None` when the crop is not in the table.
    pub fn lookup(&self, name: &str) -> Option<&'static KnowledgeRecord> {
        let key = normalize_name(name);
        let records = self.records;
        self.index.get(key.as_str()).map(|&i| &records[i])
    }

    /// Crop names in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.records.iter().map(|r| r.name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lookup key for a crop name: trimmed and lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Display form of a crop name ("sweet potato" -> "Sweet Potato")
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
