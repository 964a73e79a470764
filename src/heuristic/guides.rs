//! Fallback growing guides and requirement profiles.

use serde::{Deserialize, Serialize};

use super::HeuristicScorer;
use crate::knowledge::{title_case, CropRequirements};

/// Tips attached to every heuristic plan
pub const STANDARD_TIPS: &[&str] = &[
    "Regular soil testing helps optimize fertilizer use",
    "Monitor weather forecasts for irrigation planning",
    "Integrated pest management reduces chemical dependency",
    "Crop rotation maintains soil fertility",
    "Market research helps in crop selection",
];

/// Step-by-step growing guide for one crop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowingGuide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub how_to_plant: String,
    #[serde(default)]
    pub fertilizer: String,
    #[serde(default)]
    pub ideal_rainfall: String,
    #[serde(default)]
    pub post_harvest: String,
}

struct GuideEntry {
    crop: &'static str,
    timeline: &'static str,
    how_to_plant: &'static str,
    fertilizer: &'static str,
    ideal_rainfall: &'static str,
    post_harvest: &'static str,
}

static GUIDES: &[GuideEntry] = &[
    GuideEntry {
        crop: "rice",
        timeline: "Plant: June-July (Monsoon) | Harvest: November-December (120-150 days)",
        how_to_plant: "Prepare nursery beds, sow seeds in puddle fields, transplant 25-30 day old seedlings with 20x15 cm spacing",
        fertilizer: "Apply 120:60:40 kg NPK per hectare. Basal dose at transplanting, top dress nitrogen in 2-3 splits",
        ideal_rainfall: "Requires 1000-1200mm water. Maintain 2-5cm standing water during vegetative growth",
        post_harvest: "Dry to 14% moisture, store in cool dry place. Market timing: December-January for best prices",
    },
    GuideEntry {
        crop: "wheat",
        timeline: "Plant: November-December (Rabi) | Harvest: March-April (120-150 days)",
        how_to_plant: "Sow seeds 2-3cm deep with 20-23cm row spacing. Seed rate: 100-125 kg/hectare",
        fertilizer: "Apply 120:60:40 kg NPK per hectare. Full P&K at sowing, nitrogen in 2-3 splits",
        ideal_rainfall: "Requires 300-400mm water. 4-6 irrigations at critical growth stages",
        post_harvest: "Harvest at physiological maturity, dry to 12% moisture. Store in moisture-proof containers",
    },
    GuideEntry {
        crop: "tomato",
        timeline: "Plant: February-March (Summer) | Harvest: May-June (90-120 days)",
        how_to_plant: "Raise seedlings in nursery, transplant 4-6 week old seedlings with 60x45 cm spacing",
        fertilizer: "Apply 150:100:100 kg NPK per hectare. Weekly liquid fertilizer during fruiting",
        ideal_rainfall: "Requires 400-600mm water. Drip irrigation recommended for water efficiency",
        post_harvest: "Harvest at breaker stage, store at 12-15°C. Market within 7-10 days for best returns",
    },
];

/// Growing guide for a crop, falling back to season-generic advice
pub fn fallback_guide(crop: &str, season: &str) -> GrowingGuide {
    let key = crop.trim().to_lowercase();
    let title = format!("Complete Growing Guide for {}", title_case(&key));

    match GUIDES.iter().find(|g| g.crop == key) {
        Some(g) => GrowingGuide {
            title,
            timeline: g.timeline.to_string(),
            how_to_plant: g.how_to_plant.to_string(),
            fertilizer: g.fertilizer.to_string(),
            ideal_rainfall: g.ideal_rainfall.to_string(),
            post_harvest: g.post_harvest.to_string(),
        },
        None => GrowingGuide {
            title,
            timeline: format!(
                "Optimal planting season: {}. Consult local agricultural extension for specific timing",
                title_case(season)
            ),
            how_to_plant: "Follow standard agricultural practices for your region. Prepare soil, select quality seeds, maintain proper spacing".to_string(),
            fertilizer: "Use balanced NPK fertilizer based on soil test recommendations. Apply organic matter for soil health".to_string(),
            ideal_rainfall: "Ensure adequate water supply through irrigation. Monitor soil moisture regularly".to_string(),
            post_harvest: "Proper harvesting, drying, and storage are crucial. Time marketing for best prices".to_string(),
        },
    }
}

/// Requirements for a crop outside the knowledge store.
///
/// Crops known to the scorer get their rule rendered into soil and climate
/// lines; anything else gets generic guidance. Never empty.
pub fn requirements_profile(scorer: &HeuristicScorer, crop: &str) -> CropRequirements {
    let mut profile = CropRequirements {
        growing_tips: vec![
            "Test soil before sowing and correct pH with lime or gypsum as needed".to_string(),
            "Use certified seed of a locally adapted variety".to_string(),
            "Follow local agricultural extension advice for sowing dates".to_string(),
        ],
        harvest_info: vec![
            "Growing Duration: varies by variety and region".to_string(),
            "Best Harvest Time: consult local extension services".to_string(),
        ],
        ..Default::default()
    };

    match scorer.rule_for(crop) {
        Some((season, rule)) => {
            profile.soil_requirements = vec![
                format!("pH Level: {:.1}-{:.1}", rule.ph_range.0, rule.ph_range.1),
                format!("Soil Type: {}", rule.soils.join(" or ")),
            ];
            profile.climate_requirements = vec![
                format!("Temperature: {}-{}°C", rule.temp_range.0, rule.temp_range.1),
                format!("Rainfall: at least {} mm", rule.rainfall_min),
                format!("Season: {}", title_case(season)),
            ];
        }
        None => {
            profile.soil_requirements = vec![
                "pH Level: 6.0-7.5 suits most field crops".to_string(),
                "Soil Type: well-drained loam rich in organic matter".to_string(),
            ];
            profile.climate_requirements = vec![
                "Temperature: check regional sowing calendars".to_string(),
                "Rainfall: supplement with irrigation during dry spells".to_string(),
            ];
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_guide() {
        let guide = fallback_guide("Rice", "monsoon");
        assert_eq!(guide.title, "Complete Growing Guide for Rice");
        assert!(guide.timeline.starts_with("Plant: June-July"));
    }

    #[test]
    fn test_generic_guide_mentions_season() {
        let guide = fallback_guide("barley", "winter");
        assert_eq!(guide.title, "Complete Growing Guide for Barley");
        assert!(guide.timeline.contains("Winter"));
        assert!(!guide.post_harvest.is_empty());
    }

    #[test]
    fn test_profile_from_rule() {
        let profile = requirements_profile(&HeuristicScorer::new(), "Okra");
        assert_eq!(profile.soil_requirements[0], "pH Level: 6.0-7.5");
        assert_eq!(profile.soil_requirements[1], "Soil Type: loamy or sandy");
        assert_eq!(profile.climate_requirements[0], "Temperature: 25-35°C");
        assert_eq!(profile.climate_requirements[2], "Season: Summer");
    }

    #[test]
    fn test_profile_for_unknown_crop_is_not_empty() {
        let profile = requirements_profile(&HeuristicScorer::new(), "quinoa");
        assert!(!profile.soil_requirements.is_empty());
        assert!(!profile.climate_requirements.is_empty());
        assert!(!profile.growing_tips.is_empty());
        assert!(!profile.harvest_info.is_empty());
    }
}
