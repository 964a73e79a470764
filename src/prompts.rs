//! Prompt templates, one per call site.
//!
//! Each template pins the output shape its parser expects: labeled sections
//! for requirements, labeled fields for predictions, a JSON object for plans.

use crate::conditions::ConditionSet;

/// Crops the prediction prompt offers as examples
const COMMON_CROPS: &str =
    "rice, wheat, maize, cotton, sugarcane, potato, tomato, banana, mango, grapes";

fn or_na(value: Option<f64>) -> String {
    value.map(|v| format!("{}", v)).unwrap_or_else(|| "n/a".to_string())
}

fn text_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default)
}

/// Growing requirements for a crop outside the knowledge store
pub fn requirements(crop: &str) -> String {
    format!(
        r#"You are an agricultural scientist. List the ideal growing conditions for {crop}.

Answer using exactly these section labels, each followed by "- " bullets:

CROP: {crop}
SOIL_REQUIREMENTS:
- Nitrogen (N): [range] kg/ha
- Phosphorus (P): [range] kg/ha
- Potassium (K): [range] kg/ha
- pH Level: [range]
- Soil Type: [type]

CLIMATE_REQUIREMENTS:
- Temperature: [range]°C
- Humidity: [range]%
- Rainfall: [range] mm
- Season: [best season]

GROWING_TIPS:
- [tip]
- [tip]
- [tip]

HARVEST_INFO:
- Growing Duration: [duration]
- Best Harvest Time: [time]
- Expected Yield: [yield]

Keep every bullet short and specific to {crop}."#,
        crop = crop
    )
}

/// Short single-crop prediction in labeled-field form
pub fn predict(conditions: &ConditionSet) -> String {
    format!(
        r#"You are an agricultural expert. Recommend ONE crop for these conditions:

N:{n} P:{p} K:{k} pH:{ph} Temp:{temp}°C Humidity:{humidity}% Rain:{rain}mm

Reply in exactly this format:
CROP: [name]
REASON: [one sentence]
YIELD: [High/Medium/Low]
TIPS:
- [tip]
- [tip]

Common crops: {common}"#,
        n = or_na(conditions.nitrogen),
        p = or_na(conditions.phosphorus),
        k = or_na(conditions.potassium),
        ph = conditions.ph,
        temp = conditions.temperature,
        humidity = or_na(conditions.humidity),
        rain = conditions.rainfall,
        common = COMMON_CROPS,
    )
}

/// Full crop plan as a JSON object
pub fn plan(conditions: &ConditionSet) -> String {
    format!(
        r#"You are an agricultural advisor. Recommend a crop and a growing guide for this farm.

Farm conditions:
- Soil pH: {ph}
- Temperature: {temp}°C
- Rainfall: {rain} mm
- Soil type: {soil}
- Season: {season}
- Market demand: {demand}
- Current fertilizer: {fertilizer}
- Pest issues: {pests}
- Irrigation: {irrigation}

Reply with a single JSON object and nothing else:
{{
  "crop": "crop name",
  "confidence": "High/Medium/Low",
  "guide": {{
    "title": "Complete Growing Guide for <crop>",
    "timeline": "planting and harvest months with duration",
    "how_to_plant": "seed depth, spacing and land preparation",
    "fertilizer": "NPK ratios and application schedule",
    "ideal_rainfall": "water requirement and irrigation schedule",
    "post_harvest": "storage, processing and marketing"
  }},
  "additional_tips": ["tip", "tip", "tip"],
  "expected_yield": "yield per acre or hectare",
  "market_price": "price range and best selling period"
}}"#,
        ph = conditions.ph,
        temp = conditions.temperature,
        rain = conditions.rainfall,
        soil = conditions.soil_type,
        season = conditions.season,
        demand = text_or(&conditions.market_demand, "Medium"),
        fertilizer = text_or(&conditions.fertilizer, "None"),
        pests = text_or(&conditions.pest_issue, "None"),
        irrigation = text_or(&conditions.irrigation, "Rainfed"),
    )
}

/// Assistant persona prepended to every chat message
pub const CHAT_SYSTEM: &str = "You are AgriBot, an agricultural assistant. Give accurate, practical \
answers about farming, crops, weather impact, soil health, pest control and sustainable practices \
in short clear paragraphs. Politely decline questions outside agriculture, greetings excepted.";

pub fn chat(message: &str) -> String {
    format!("{}\n\nUser: {}\nAgriBot:", CHAT_SYSTEM, message)
}

/// Loan eligibility review of a JSON application
pub fn loan(application: &str) -> String {
    format!(
        r#"You advise Indian farmers on agricultural loan eligibility.

Consider only schemes offered by nationalized banks, private Indian banks,
Regional Rural Banks, cooperative banks, NABARD and government programmes.

Application (JSON): {application}

Identify the loan type, assess eligibility from the fields given, note
strengths, challenges and missing information, and suggest concrete steps to
improve eligibility along with applicable subsidies. Do not assume facts that
are not in the application.

Answer in Markdown with these headings: Loan Type, Eligibility Status,
Loan Range, Improvements, Schemes. Use "- " bullets for lists."#,
        application = application
    )
}

/// Image-conditioned disease diagnosis
pub const DISEASE_VISION: &str = "Examine this plant image as an agricultural expert and report:

1. Disease/Condition: what is affecting the plant
2. Severity: Mild/Moderate/Severe
3. Symptoms: what is visible in the image
4. Treatment: two or three practical remedies
5. Prevention: key preventive measures

Keep it short and farmer-friendly.";

/// Generic disease guide used without a vision model
pub const DISEASE_TEXT: &str = "You are a plant pathologist. Without a specific image, write a \
general plant disease guide with these sections:

1. Common Plant Diseases: three or four frequent fungal, bacterial or viral diseases
2. General Symptoms: what to look for on affected plants
3. Treatment Options: two or three practical remedies per disease type
4. Prevention: key preventive measures

Use clear sections and bullet points.";

/// Prefix on text-only disease output
pub const DISEASE_TEXT_NOTE: &str =
    "**Note**: general disease guide (image analysis unavailable or disabled)";

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> ConditionSet {
        ConditionSet::new(6.5, 27.0, 1100.0)
            .unwrap()
            .with_soil("clay")
            .with_season("monsoon")
    }

    #[test]
    fn test_requirements_prompt_names_sections() {
        let prompt = requirements("Quinoa");
        for label in ["SOIL_REQUIREMENTS:", "CLIMATE_REQUIREMENTS:", "GROWING_TIPS:", "HARVEST_INFO:"] {
            assert!(prompt.contains(label), "missing {}", label);
        }
        assert!(prompt.contains("conditions for Quinoa"));
    }

    #[test]
    fn test_predict_prompt_marks_missing_values() {
        let prompt = predict(&conditions());
        assert!(prompt.contains("N:n/a"));
        assert!(prompt.contains("pH:6.5"));
        assert!(prompt.contains("Rain:1100mm"));
    }

    #[test]
    fn test_plan_prompt_defaults() {
        let prompt = plan(&conditions());
        assert!(prompt.contains("- Soil type: clay"));
        assert!(prompt.contains("- Irrigation: Rainfed"));
        assert!(prompt.contains("\"additional_tips\""));
    }

    #[test]
    fn test_chat_prompt() {
        assert!(chat("When to sow wheat?").ends_with("User: When to sow wheat?\nAgriBot:"));
    }
}
