//! Heuristic Crop Scorer
//!
//! Deterministic, network-free fallback used when generation is unavailable.
//!
//! # Algorithm
//!
//! For each candidate in the season's rule table, add:
//!
//! | Check | Points |
//! |---|---|
//! | pH inside range | +3 (else +1 if within 1.0 of midpoint) |
//! | temperature inside range | +3 (else +1 if within 5.0 of midpoint) |
//! | rainfall >= minimum | +2 (else +1 if >= 80% of minimum) |
//! | soil type compatible | +2 |
//!
//! The highest score wins. Ties go to the candidate listed first in the
//! table: a later candidate replaces the current best only when its score is
//! strictly greater. Nothing above zero, or an unknown season, selects the
//! catch-all crop.

pub mod guides;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conditions::ConditionSet;

pub use guides::{fallback_guide, requirements_profile, GrowingGuide, STANDARD_TIPS};

/// Crop recommended when no candidate scores above zero
pub const CATCH_ALL_CROP: &str = "mixed vegetables";

/// Confidence level attached to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Map a heuristic score: >= 8 High, >= 5 Medium, else Low
    pub fn from_score(score: u32) -> Self {
        if score >= 8 {
            Confidence::High
        } else if score >= 5 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Parse free text such as "high", "Medium - good soil" or "LOW".
    pub fn parse(text: &str) -> Option<Self> {
        let word = text
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .split(|c: char| !c.is_alphanumeric())
            .next()?
            .to_lowercase();
        match word.as_str() {
            "high" => Some(Confidence::High),
            "medium" | "moderate" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Growing window for one candidate crop
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRule {
    pub crop: &'static str,
    /// Inclusive pH range
    pub ph_range: (f64, f64),
    /// Inclusive temperature range in °C
    pub temp_range: (f64, f64),
    /// Minimum rainfall in mm
    pub rainfall_min: f64,
    /// Compatible soil types, lowercase
    pub soils: &'static [&'static str],
}

impl CandidateRule {
    /// Additive score of this candidate against the conditions
    pub fn score(&self, conditions: &ConditionSet) -> u32 {
        let mut score = 0;

        score += range_points(conditions.ph, self.ph_range, 1.0);
        score += range_points(conditions.temperature, self.temp_range, 5.0);

        if conditions.rainfall >= self.rainfall_min {
            score += 2;
        } else if conditions.rainfall >= self.rainfall_min * 0.8 {
            score += 1;
        }

        if self.soils.contains(&conditions.soil_type.as_str()) {
            score += 2;
        }

        score
    }
}

fn range_points(value: f64, (low, high): (f64, f64), near: f64) -> u32 {
    if low <= value && value <= high {
        3
    } else if (value - (low + high) / 2.0).abs() < near {
        1
    } else {
        0
    }
}

/// Candidates for one season, in tie-break order
#[derive(Debug)]
pub struct SeasonTable {
    pub season: &'static str,
    pub candidates: &'static [CandidateRule],
}

static SEASONS: &[SeasonTable] = &[
    SeasonTable {
        season: "monsoon",
        candidates: &[
            CandidateRule {
                crop: "rice",
                ph_range: (5.5, 7.0),
                temp_range: (20.0, 35.0),
                rainfall_min: 1000.0,
                soils: &["clay", "loamy"],
            },
            CandidateRule {
                crop: "sugarcane",
                ph_range: (6.0, 8.0),
                temp_range: (20.0, 30.0),
                rainfall_min: 750.0,
                soils: &["clay", "loamy"],
            },
            CandidateRule {
                crop: "cotton",
                ph_range: (5.8, 8.0),
                temp_range: (21.0, 30.0),
                rainfall_min: 500.0,
                soils: &["black", "loamy"],
            },
            CandidateRule {
                crop: "maize",
                ph_range: (6.0, 7.5),
                temp_range: (21.0, 27.0),
                rainfall_min: 600.0,
                soils: &["loamy", "sandy"],
            },
        ],
    },
    SeasonTable {
        season: "winter",
        candidates: &[
            CandidateRule {
                crop: "wheat",
                ph_range: (6.0, 7.5),
                temp_range: (10.0, 25.0),
                rainfall_min: 300.0,
                soils: &["loamy", "clay"],
            },
            CandidateRule {
                crop: "barley",
                ph_range: (6.0, 7.5),
                temp_range: (12.0, 25.0),
                rainfall_min: 250.0,
                soils: &["loamy", "sandy"],
            },
            CandidateRule {
                crop: "mustard",
                ph_range: (6.0, 7.5),
                temp_range: (10.0, 25.0),
                rainfall_min: 200.0,
                soils: &["loamy", "sandy"],
            },
            CandidateRule {
                crop: "peas",
                ph_range: (6.0, 7.0),
                temp_range: (10.0, 20.0),
                rainfall_min: 300.0,
                soils: &["loamy", "clay"],
            },
        ],
    },
    SeasonTable {
        season: "summer",
        candidates: &[
            CandidateRule {
                crop: "tomato",
                ph_range: (6.0, 7.0),
                temp_range: (20.0, 30.0),
                rainfall_min: 400.0,
                soils: &["loamy", "sandy"],
            },
            CandidateRule {
                crop: "cucumber",
                ph_range: (6.0, 7.0),
                temp_range: (18.0, 30.0),
                rainfall_min: 350.0,
                soils: &["loamy", "sandy"],
            },
            CandidateRule {
                crop: "okra",
                ph_range: (6.0, 7.5),
                temp_range: (25.0, 35.0),
                rainfall_min: 300.0,
                soils: &["loamy", "sandy"],
            },
            CandidateRule {
                crop: "watermelon",
                ph_range: (6.0, 7.0),
                temp_range: (20.0, 30.0),
                rainfall_min: 400.0,
                soils: &["sandy", "loamy"],
            },
        ],
    },
];

/// Outcome of scoring a condition set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    /// Winning crop (lowercase), or the catch-all
    pub crop: &'static str,
    /// Winning score, 0 for the catch-all
    pub score: u32,
    pub confidence: Confidence,
}

/// Season-indexed rule engine
#[derive(Debug, Clone, Copy)]
pub struct HeuristicScorer {
    seasons: &'static [SeasonTable],
}

impl HeuristicScorer {
    /// Scorer over the built-in monsoon/winter/summer tables
    pub fn new() -> Self {
        Self { seasons: SEASONS }
    }

    /// Season table for a (case-insensitive) season key
    pub fn season(&self, season: &str) -> Option<&'static SeasonTable> {
        let key = season.trim().to_lowercase();
        self.seasons.iter().find(|t| t.season == key)
    }

    /// Pick the best crop for the conditions
    pub fn score(&self, conditions: &ConditionSet) -> ScoreOutcome {
        let mut best: Option<&'static str> = None;
        let mut best_score = 0;

        if let Some(table) = self.season(&conditions.season) {
            for rule in table.candidates {
                let score = rule.score(conditions);
                if score > best_score {
                    best_score = score;
                    best = Some(rule.crop);
                }
            }
        }

        ScoreOutcome {
            crop: best.unwrap_or(CATCH_ALL_CROP),
            score: best_score,
            confidence: Confidence::from_score(best_score),
        }
    }

    /// Rule for a crop in any season, with its season key
    pub fn rule_for(&self, crop: &str) -> Option<(&'static str, &'static CandidateRule)> {
        let key = crop.trim().to_lowercase();
        self.seasons.iter().find_map(|table| {
            table
                .candidates
                .iter()
                .find(|rule| rule.crop == key)
                .map(|rule| (table.season, rule))
        })
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new()
    }
}
