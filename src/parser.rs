//! Generated Text Parsing
//!
//! Turns free-form model output into structured data. Three shapes:
//!
//! - **Embedded JSON**: slice from the first `{` to the last `}` and parse.
//!   Fails with [`ParseError::MalformedOutput`].
//! - **Labeled sections**: `LABEL:` headers followed by `- ` bullets, scanned
//!   by a small state machine. Never fails; unrecognized text leaves every
//!   section empty with the raw text kept.
//! - **Labeled fields**: single-line `CROP:` / `REASON:` / `YIELD:` values
//!   plus a `TIPS:` bullet list. Never fails; missing fields take defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::heuristic::Confidence;
use crate::knowledge::CropRequirements;

/// Bullet entries shorter than this (after stripping) are dropped as noise
pub const MIN_ENTRY_LEN: usize = 6;

/// Parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Malformed generation output: {0}")]
    MalformedOutput(String),
}

/// Locate the embedded JSON object: first `{` through last `}`
pub fn extract_json(text: &str) -> Result<&str, ParseError> {
    let start = text
        .find('{')
        .ok_or_else(|| ParseError::MalformedOutput("No JSON found in response".to_string()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| ParseError::MalformedOutput("No closing brace found".to_string()))?;
    if end < start {
        return Err(ParseError::MalformedOutput(
            "Closing brace precedes opening brace".to_string(),
        ));
    }
    Ok(&text[start..=end])
}

/// Parse the embedded JSON object as an untyped value
pub fn parse_json_object(text: &str) -> Result<serde_json::Value, ParseError> {
    let json = extract_json(text)?;
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ParseError::MalformedOutput(format!("JSON parse error: {}", e)))?;
    if !value.is_object() {
        return Err(ParseError::MalformedOutput("Expected a JSON object".to_string()));
    }
    Ok(value)
}

/// Parse the embedded JSON object into `T`
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let json = extract_json(text)?;
    serde_json::from_str(json)
        .map_err(|e| ParseError::MalformedOutput(format!("JSON parse error: {}", e)))
}

/// Recognized section headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Soil,
    Climate,
    Tips,
    Harvest,
}

impl Section {
    /// Match a header label, ignoring case, underscores, extra spaces and
    /// markdown markers
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "SOIL REQUIREMENTS" => Some(Section::Soil),
            "CLIMATE REQUIREMENTS" => Some(Section::Climate),
            "GROWING TIPS" => Some(Section::Tips),
            "HARVEST INFO" | "HARVEST INFORMATION" => Some(Section::Harvest),
            _ => None,
        }
    }
}

/// Result of labeled-section parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabeledSections {
    pub soil_requirements: Vec<String>,
    pub climate_requirements: Vec<String>,
    pub growing_tips: Vec<String>,
    pub harvest_info: Vec<String>,
    /// Input text, verbatim
    pub raw_text: String,
}

impl LabeledSections {
    fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Soil => &mut self.soil_requirements,
            Section::Climate => &mut self.climate_requirements,
            Section::Tips => &mut self.growing_tips,
            Section::Harvest => &mut self.harvest_info,
        }
    }

    /// True when no section collected anything
    pub fn is_empty(&self) -> bool {
        self.soil_requirements.is_empty()
            && self.climate_requirements.is_empty()
            && self.growing_tips.is_empty()
            && self.harvest_info.is_empty()
    }

    pub fn into_requirements(self) -> CropRequirements {
        CropRequirements {
            soil_requirements: self.soil_requirements,
            climate_requirements: self.climate_requirements,
            growing_tips: self.growing_tips,
            harvest_info: self.harvest_info,
        }
    }
}

/// Scan `LABEL:` headers and `- ` bullets into the four requirement sections
pub fn parse_sections(text: &str) -> LabeledSections {
    let mut result = LabeledSections {
        raw_text: text.to_string(),
        ..Default::default()
    };
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let line = strip_emphasis(line.trim());
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match bullet_body(line) {
            Some(body) => {
                // "- Soil Requirements:" with nothing after it is a header
                if let Some((label, value)) = split_label(body) {
                    if value.is_empty() {
                        if let Some(section) = Section::from_label(label) {
                            current = Some(section);
                            continue;
                        }
                    }
                }
                if let Some(section) = current {
                    if body.chars().count() >= MIN_ENTRY_LEN {
                        result.section_mut(section).push(body.to_string());
                    }
                }
            }
            None => {
                if let Some(section) = split_label(line).and_then(|(l, _)| Section::from_label(l)) {
                    current = Some(section);
                }
            }
        }
    }

    result
}

/// Result of labeled-field parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionFields {
    /// Lowercased crop name; `None` when absent or "unknown"
    pub crop: Option<String>,
    pub reason: String,
    pub yield_level: Confidence,
    pub tips: Vec<String>,
    pub raw_text: String,
}

/// Default reason when the model gave none
pub const DEFAULT_REASON: &str = "Analysis completed";

/// Default tips when the model gave none
pub const DEFAULT_TIPS: &[&str] = &[
    "Follow standard agricultural practices",
    "Monitor soil health regularly",
];

/// Scan `CROP:`, `REASON:`, `YIELD:` and `TIPS:` fields
pub fn parse_prediction(text: &str) -> PredictionFields {
    let mut crop = None;
    let mut reason = None;
    let mut yield_level = None;
    let mut tips = Vec::new();

    for line in text.lines() {
        let line = strip_emphasis(line.trim());
        let line = line.trim();

        if let Some(body) = bullet_body(line) {
            if !body.is_empty() {
                tips.push(body.to_string());
            }
            continue;
        }

        let Some((label, value)) = split_label(line) else {
            continue;
        };
        match normalize_label(label).as_str() {
            "CROP" | "RECOMMENDED CROP" => {
                let name = value.trim_matches(|c: char| c == '.' || c == '*').to_lowercase();
                if !name.is_empty() && name != "unknown" {
                    crop = Some(name);
                }
            }
            "REASON" => {
                if !value.is_empty() {
                    reason = Some(value.to_string());
                }
            }
            "YIELD" | "YIELD POTENTIAL" => yield_level = Confidence::parse(value),
            _ => {}
        }
    }

    if tips.is_empty() {
        tips = DEFAULT_TIPS.iter().map(|s| s.to_string()).collect();
    }

    PredictionFields {
        crop,
        reason: reason.unwrap_or_else(|| DEFAULT_REASON.to_string()),
        yield_level: yield_level.unwrap_or(Confidence::Medium),
        tips,
        raw_text: text.to_string(),
    }
}

fn strip_emphasis(line: &str) -> String {
    line.replace("**", "").replace("__", "")
}

/// Text after a leading `-`, `*` or `•` marker
fn bullet_body(line: &str) -> Option<&str> {
    if line.starts_with(['-', '*', '•']) {
        Some(line.trim_start_matches(['-', '*', '•']).trim())
    } else {
        None
    }
}

/// Split `LABEL: value` at the first colon
fn split_label(line: &str) -> Option<(&str, &str)> {
    let (label, value) = line.split_once(':')?;
    let label = label.trim_start_matches('#').trim();
    if label.is_empty() || label.len() > 40 {
        return None;
    }
    Some((label, value.trim()))
}

/// Uppercased label with list numbering like `1.` or `2)` dropped
fn normalize_label(label: &str) -> String {
    label
        .trim_start_matches(|c: char| !c.is_alphabetic())
        .replace(['_', '*', '#'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
