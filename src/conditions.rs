//! Farm Condition Sets
//!
//! Raw form-style input is parsed and range-checked here, before anything
//! reaches the resolver. A [`ConditionSet`] can only be obtained through
//! [`RawConditions::validate`] or [`ConditionSet::new`], so every value the
//! resolver sees is a finite number inside its physical range.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valid soil pH range
pub const PH_RANGE: (f64, f64) = (0.0, 14.0);
/// Valid air temperature range in °C
pub const TEMPERATURE_RANGE: (f64, f64) = (-10.0, 50.0);
/// Valid relative humidity range in percent
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Soil type assumed when the caller leaves it out
pub const DEFAULT_SOIL: &str = "loamy";
/// Season assumed when the caller leaves it out
pub const DEFAULT_SEASON: &str = "monsoon";

/// Maximum length of free-text categorical fields
const MAX_FIELD_LEN: usize = 100;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Unvalidated condition fields as they arrive from a form or CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConditions {
    pub ph: Option<String>,
    pub temperature: Option<String>,
    pub rainfall: Option<String>,
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub humidity: Option<String>,
    pub soil_type: Option<String>,
    pub season: Option<String>,
    pub market_demand: Option<String>,
    pub irrigation: Option<String>,
    pub fertilizer: Option<String>,
    pub pest_issue: Option<String>,
}

impl RawConditions {
    /// Parse and range-check every field.
    ///
    /// pH, temperature and rainfall are required. Soil type and season
    /// default to loamy/monsoon. Categorical text is sanitized.
    pub fn validate(&self) -> Result<ConditionSet, ValidationError> {
        let ph = required("pH", self.ph.as_deref())?;
        let temperature = required("Temperature", self.temperature.as_deref())?;
        let rainfall = required("Rainfall", self.rainfall.as_deref())?;

        let mut set = ConditionSet::new(ph, temperature, rainfall)?;
        set.nitrogen = optional("N", self.nitrogen.as_deref())?;
        set.phosphorus = optional("P", self.phosphorus.as_deref())?;
        set.potassium = optional("K", self.potassium.as_deref())?;
        set.humidity = optional("Humidity", self.humidity.as_deref())?;

        for (field, value) in [
            ("N", set.nitrogen),
            ("P", set.phosphorus),
            ("K", set.potassium),
        ] {
            if let Some(v) = value {
                check_non_negative(field, v)?;
            }
        }
        if let Some(h) = set.humidity {
            check_range("Humidity", h, HUMIDITY_RANGE)?;
        }

        if let Some(soil) = categorical(self.soil_type.as_deref()) {
            set.soil_type = soil.to_lowercase();
        }
        if let Some(season) = categorical(self.season.as_deref()) {
            set.season = season.to_lowercase();
        }
        set.market_demand = categorical(self.market_demand.as_deref());
        set.irrigation = categorical(self.irrigation.as_deref());
        set.fertilizer = categorical(self.fertilizer.as_deref());
        set.pest_issue = categorical(self.pest_issue.as_deref());

        Ok(set)
    }
}

/// Validated farm conditions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSet {
    pub ph: f64,
    /// °C
    pub temperature: f64,
    /// mm
    pub rainfall: f64,
    /// kg/ha
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    /// percent
    pub humidity: Option<f64>,
    /// lowercase
    pub soil_type: String,
    /// lowercase
    pub season: String,
    pub market_demand: Option<String>,
    pub irrigation: Option<String>,
    pub fertilizer: Option<String>,
    pub pest_issue: Option<String>,
}

impl ConditionSet {
    /// Create a condition set from the three required numeric fields,
    /// with default soil and season.
    pub fn new(ph: f64, temperature: f64, rainfall: f64) -> Result<Self, ValidationError> {
        check_range("pH", ph, PH_RANGE)?;
        check_range("Temperature", temperature, TEMPERATURE_RANGE)?;
        check_non_negative("Rainfall", rainfall)?;

        Ok(Self {
            ph,
            temperature,
            rainfall,
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            humidity: None,
            soil_type: DEFAULT_SOIL.to_string(),
            season: DEFAULT_SEASON.to_string(),
            market_demand: None,
            irrigation: None,
            fertilizer: None,
            pest_issue: None,
        })
    }

    /// Set soil type (normalized to lowercase)
    pub fn with_soil(mut self, soil: &str) -> Self {
        self.soil_type = soil.trim().to_lowercase();
        self
    }

    /// Set season (normalized to lowercase)
    pub fn with_season(mut self, season: &str) -> Self {
        self.season = season.trim().to_lowercase();
        self
    }

    /// Set N/P/K in kg/ha
    pub fn with_npk(mut self, n: f64, p: f64, k: f64) -> Result<Self, ValidationError> {
        check_non_negative("N", n)?;
        check_non_negative("P", p)?;
        check_non_negative("K", k)?;
        self.nitrogen = Some(n);
        self.phosphorus = Some(p);
        self.potassium = Some(k);
        Ok(self)
    }

    /// Set relative humidity in percent
    pub fn with_humidity(mut self, humidity: f64) -> Result<Self, ValidationError> {
        check_range("Humidity", humidity, HUMIDITY_RANGE)?;
        self.humidity = Some(humidity);
        Ok(self)
    }
}

/// Strip markup and quoting characters from free text and cap its length
pub fn sanitize_text(text: &str, max_len: usize) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    let cleaned: String = stripped
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect();
    cleaned.trim().chars().take(max_len).collect::<String>().trim().to_string()
}

fn categorical(value: Option<&str>) -> Option<String> {
    value
        .map(|v| sanitize_text(v, MAX_FIELD_LEN))
        .filter(|v| !v.is_empty())
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        }),
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<f64, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => parse_number(field, v),
        _ => Err(ValidationError::Missing(field)),
    }
}

fn optional(field: &'static str, value: Option<&str>) -> Result<Option<f64>, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => parse_number(field, v).map(Some),
        _ => Ok(None),
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ph: &str, temp: &str, rain: &str) -> RawConditions {
        RawConditions {
            ph: Some(ph.to_string()),
            temperature: Some(temp.to_string()),
            rainfall: Some(rain.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ph_boundaries() {
        assert!(raw("0", "25", "500").validate().is_ok());
        assert!(raw("14", "25", "500").validate().is_ok());
        assert!(matches!(
            raw("14.01", "25", "500").validate(),
            Err(ValidationError::OutOfRange { field: "pH", .. })
        ));
        assert!(raw("-0.1", "25", "500").validate().is_err());
    }

    #[test]
    fn test_temperature_and_rainfall_ranges() {
        assert!(raw("7", "-10", "0").validate().is_ok());
        assert!(raw("7", "50", "0").validate().is_ok());
        assert!(raw("7", "50.5", "0").validate().is_err());
        assert!(matches!(
            raw("7", "25", "-1").validate(),
            Err(ValidationError::Negative { field: "Rainfall", .. })
        ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_eq!(
            raw("acidic", "25", "500").validate(),
            Err(ValidationError::NotANumber {
                field: "pH",
                value: "acidic".to_string()
            })
        );
        assert!(raw("NaN", "25", "500").validate().is_err());
        assert!(raw("7", "inf", "500").validate().is_err());
    }

    #[test]
    fn test_missing_required_field() {
        let mut input = raw("7", "25", "500");
        input.rainfall = Some("   ".to_string());
        assert_eq!(input.validate(), Err(ValidationError::Missing("Rainfall")));
    }

    #[test]
    fn test_defaults_and_normalization() {
        let set = raw("6.5", " 27 ", "1100").validate().unwrap();
        assert_eq!(set.soil_type, "loamy");
        assert_eq!(set.season, "monsoon");

        let mut input = raw("6.5", "27", "1100");
        input.soil_type = Some(" Clay ".to_string());
        input.season = Some("WINTER".to_string());
        input.nitrogen = Some("80".to_string());
        input.humidity = Some("".to_string());
        let set = input.validate().unwrap();
        assert_eq!(set.soil_type, "clay");
        assert_eq!(set.season, "winter");
        assert_eq!(set.nitrogen, Some(80.0));
        assert_eq!(set.humidity, None);
    }

    #[test]
    fn test_optional_numeric_checks() {
        let mut input = raw("6.5", "27", "1100");
        input.potassium = Some("-5".to_string());
        assert!(matches!(
            input.validate(),
            Err(ValidationError::Negative { field: "K", .. })
        ));

        let mut input = raw("6.5", "27", "1100");
        input.humidity = Some("101".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let set = ConditionSet::new(6.5, 27.0, 1100.0)
            .unwrap()
            .with_soil("Black")
            .with_season(" Summer ")
            .with_npk(90.0, 42.0, 43.0)
            .unwrap();
        assert_eq!(set.soil_type, "black");
        assert_eq!(set.season, "summer");
        assert_eq!(set.potassium, Some(43.0));
        assert!(ConditionSet::new(15.0, 20.0, 0.0).is_err());
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("<b>Clay</b> soil", 100), "Clay soil");
        assert_eq!(sanitize_text("  it's \"ok\" ", 100), "its ok");
        assert_eq!(sanitize_text("abcdef", 3), "abc");
        assert_eq!(sanitize_text("<script>", 10), "");
    }
}
