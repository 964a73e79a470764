//! Recommendation Resolver
//!
//! Three-tier resolution for every query:
//!
//! ```text
//! Query --> knowledge store --hit--> knowledge_base
//!               | miss
//!               v
//!           LLM backend --ok + parsed--> ai_generated
//!               | unreachable / timeout / bad status / malformed JSON
//!               v
//!           heuristic scorer --> heuristic_fallback
//! ```
//!
//! `resolve` never fails. Backend and parse errors are logged and absorbed
//! by the heuristic tier; only input validation (done before a [`Query`] is
//! built) can reject a request.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::backends::{
    BackendError, GenerationOptions, GenerationRequest, GenerationResult, LlmBackend,
    ModelSelection,
};
use crate::conditions::{ConditionSet, ValidationError};
use crate::config::TimeoutConfig;
use crate::heuristic::{
    fallback_guide, requirements_profile, Confidence, GrowingGuide, HeuristicScorer,
    STANDARD_TIPS,
};
use crate::knowledge::{normalize_name, title_case, CropRequirements, KnowledgeStore};
use crate::parser::{self, ParseError};
use crate::prompts;

const FALLBACK_YIELD: &str = "Varies based on management practices and local conditions";
const FALLBACK_PRICE: &str = "Check local market rates and seasonal trends";

/// Which tier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    KnowledgeBase,
    AiGenerated,
    HeuristicFallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::KnowledgeBase => "knowledge_base",
            Provenance::AiGenerated => "ai_generated",
            Provenance::HeuristicFallback => "heuristic_fallback",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Growing requirements for a named crop
    Requirements { crop: String },
    /// Crop choice plus a full growing plan for farm conditions
    Recommend { conditions: ConditionSet },
    /// Quick single-crop prediction from soil nutrients and weather
    Predict { conditions: ConditionSet },
}

impl Query {
    /// Requirements query; rejects a blank crop name
    pub fn requirements(crop: &str) -> Result<Self, ValidationError> {
        let crop = crop.trim();
        if crop.is_empty() {
            return Err(ValidationError::Missing("crop"));
        }
        Ok(Query::Requirements {
            crop: crop.to_string(),
        })
    }
}

/// Crop plan: growing guide plus market outlook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    pub guide: GrowingGuide,
    pub additional_tips: Vec<String>,
    pub expected_yield: String,
    pub market_price: String,
    /// Knowledge-store record for the recommended crop, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<CropRequirements>,
}

/// Category contents, shaped by the query kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Requirements(CropRequirements),
    Plan(CropPlan),
    Prediction { reason: String, tips: Vec<String> },
}

/// Unified result of any query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredRecommendation {
    /// Display name of the crop
    pub crop: String,
    /// Confidence or yield level; absent for requirements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    pub provenance: Provenance,
    /// Model that generated the content (ai_generated only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub content: Content,
    /// Why a lower tier was used, or a parsing caveat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Generated text, verbatim (ai_generated only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub elapsed_ms: u64,
}

/// JSON plan as the model is asked to write it. Models send nulls, numbers
/// and lists where strings are expected, so every field is read leniently.
#[derive(Debug, Default, Deserialize)]
struct PlanReply {
    #[serde(default, deserialize_with = "lenient_text")]
    crop: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_guide")]
    guide: GuideReply,
    #[serde(default, deserialize_with = "lenient_list")]
    additional_tips: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    expected_yield: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    market_price: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GuideReply {
    #[serde(default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    timeline: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    how_to_plant: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    fertilizer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    ideal_rainfall: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    post_harvest: Option<String>,
}

impl From<GuideReply> for GrowingGuide {
    fn from(reply: GuideReply) -> Self {
        GrowingGuide {
            title: reply.title.unwrap_or_default(),
            timeline: reply.timeline.unwrap_or_default(),
            how_to_plant: reply.how_to_plant.unwrap_or_default(),
            fertilizer: reply.fertilizer.unwrap_or_default(),
            ideal_rainfall: reply.ideal_rainfall.unwrap_or_default(),
            post_harvest: reply.post_harvest.unwrap_or_default(),
        }
    }
}

/// Display text for a JSON scalar; arrays are joined, null and blank are `None`
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_text(&Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().filter_map(value_text).collect(),
        other => value_text(&other).into_iter().collect(),
    })
}

fn lenient_guide<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GuideReply, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => GuideReply::default(),
    })
}

/// Three-tier recommendation resolver
pub struct Resolver {
    backend: Arc<dyn LlmBackend>,
    selection: Arc<ModelSelection>,
    timeouts: TimeoutConfig,
    knowledge: &'static KnowledgeStore,
    scorer: HeuristicScorer,
}

impl Resolver {
    /// Resolver over the built-in knowledge store and scoring tables
    pub fn new(
        backend: Arc<dyn LlmBackend>,
        selection: Arc<ModelSelection>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            backend,
            selection,
            timeouts,
            knowledge: KnowledgeStore::builtin(),
            scorer: HeuristicScorer::new(),
        }
    }

    /// Model chosen at startup
    pub fn model(&self) -> &str {
        &self.selection.model
    }

    /// Resolve a query through the knowledge, generation and heuristic tiers
    pub fn resolve(&self, query: &Query) -> StructuredRecommendation {
        let started = Instant::now();
        let mut result = match query {
            Query::Requirements { crop } => self.resolve_requirements(crop),
            Query::Recommend { conditions } => self.resolve_plan(conditions),
            Query::Predict { conditions } => self.resolve_prediction(conditions),
        };
        result.elapsed_ms = started.elapsed().as_millis() as u64;
        log::info!(
            "resolved {} via {} in {}ms",
            result.crop,
            result.provenance,
            result.elapsed_ms
        );
        result
    }

    fn generate(
        &self,
        prompt: String,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Result<GenerationResult, BackendError> {
        let request =
            GenerationRequest::new(self.model(), prompt, timeout).with_options(options);
        let result = self.backend.generate(&request)?;
        log::debug!(
            "{} returned {} chars in {:?}",
            result.model,
            result.text.len(),
            result.elapsed
        );
        Ok(result)
    }

    fn resolve_requirements(&self, crop: &str) -> StructuredRecommendation {
        if let Some(record) = self.knowledge.lookup(crop) {
            log::info!("'{}' found in knowledge base", record.name);
            return StructuredRecommendation {
                crop: title_case(record.name),
                confidence: None,
                provenance: Provenance::KnowledgeBase,
                model: None,
                content: Content::Requirements(record.to_requirements()),
                note: None,
                raw_text: None,
                elapsed_ms: 0,
            };
        }

        let name = title_case(&normalize_name(crop));
        log::info!("'{}' not in knowledge base, asking {}", name, self.model());

        match self.generate(
            prompts::requirements(&name),
            GenerationOptions::requirements(),
            self.timeouts.generation(),
        ) {
            Ok(generated) => {
                let sections = parser::parse_sections(&generated.text);
                let note = sections
                    .is_empty()
                    .then(|| "No recognized sections in model output; see raw_text".to_string());
                StructuredRecommendation {
                    crop: name,
                    confidence: None,
                    provenance: Provenance::AiGenerated,
                    model: Some(generated.model),
                    content: Content::Requirements(sections.into_requirements()),
                    note,
                    raw_text: Some(generated.text),
                    elapsed_ms: 0,
                }
            }
            Err(e) => {
                log::warn!("requirements generation failed: {}; using heuristic profile", e);
                StructuredRecommendation {
                    content: Content::Requirements(requirements_profile(&self.scorer, &name)),
                    crop: name,
                    confidence: None,
                    provenance: Provenance::HeuristicFallback,
                    model: None,
                    note: Some(fallback_note(&e)),
                    raw_text: None,
                    elapsed_ms: 0,
                }
            }
        }
    }

    fn resolve_plan(&self, conditions: &ConditionSet) -> StructuredRecommendation {
        let outcome = self
            .generate(
                prompts::plan(conditions),
                GenerationOptions::plan(),
                self.timeouts.generation(),
            )
            .map_err(|e| fallback_note(&e))
            .and_then(|generated| {
                parse_plan(&generated.text)
                    .map(|plan| (plan, generated))
                    .map_err(|e| format!("AI output unusable ({})", e))
            });

        match outcome {
            Ok(((crop, reply), generated)) => {
                let crop = title_case(&normalize_name(&crop));
                let confidence = reply
                    .confidence
                    .as_deref()
                    .and_then(Confidence::parse)
                    .unwrap_or(Confidence::Medium);
                StructuredRecommendation {
                    content: Content::Plan(CropPlan {
                        guide: reply.guide.into(),
                        additional_tips: reply.additional_tips,
                        expected_yield: reply.expected_yield.unwrap_or_else(|| "N/A".to_string()),
                        market_price: reply.market_price.unwrap_or_else(|| "N/A".to_string()),
                        requirements: self.attached_requirements(&crop),
                    }),
                    crop,
                    confidence: Some(confidence),
                    provenance: Provenance::AiGenerated,
                    model: Some(generated.model),
                    note: None,
                    raw_text: Some(generated.text),
                    elapsed_ms: 0,
                }
            }
            Err(note) => {
                log::warn!("{}; falling back to heuristic plan", note);
                self.heuristic_plan(conditions, note)
            }
        }
    }

    fn heuristic_plan(&self, conditions: &ConditionSet, note: String) -> StructuredRecommendation {
        let scored = self.scorer.score(conditions);
        let crop = title_case(scored.crop);
        StructuredRecommendation {
            content: Content::Plan(CropPlan {
                guide: fallback_guide(scored.crop, &conditions.season),
                additional_tips: STANDARD_TIPS.iter().map(|t| t.to_string()).collect(),
                expected_yield: FALLBACK_YIELD.to_string(),
                market_price: FALLBACK_PRICE.to_string(),
                requirements: self.attached_requirements(&crop),
            }),
            crop,
            confidence: Some(scored.confidence),
            provenance: Provenance::HeuristicFallback,
            model: None,
            note: Some(note),
            raw_text: None,
            elapsed_ms: 0,
        }
    }

    fn resolve_prediction(&self, conditions: &ConditionSet) -> StructuredRecommendation {
        let generated = match self.generate(
            prompts::predict(conditions),
            GenerationOptions::prediction(),
            self.timeouts.interactive(),
        ) {
            Ok(generated) => generated,
            Err(e) => {
                log::warn!("prediction generation failed: {}; scoring heuristically", e);
                return self.heuristic_prediction(conditions, fallback_note(&e));
            }
        };

        let fields = parser::parse_prediction(&generated.text);
        match fields.crop {
            Some(crop) => StructuredRecommendation {
                crop: title_case(&crop),
                confidence: Some(fields.yield_level),
                provenance: Provenance::AiGenerated,
                model: Some(generated.model),
                content: Content::Prediction {
                    reason: fields.reason,
                    tips: fields.tips,
                },
                note: None,
                raw_text: Some(fields.raw_text),
                elapsed_ms: 0,
            },
            None => {
                log::warn!("prediction named no crop; scoring heuristically");
                self.heuristic_prediction(
                    conditions,
                    "AI output named no crop".to_string(),
                )
            }
        }
    }

    fn heuristic_prediction(
        &self,
        conditions: &ConditionSet,
        note: String,
    ) -> StructuredRecommendation {
        let scored = self.scorer.score(conditions);
        StructuredRecommendation {
            crop: title_case(scored.crop),
            confidence: Some(scored.confidence),
            provenance: Provenance::HeuristicFallback,
            model: None,
            content: Content::Prediction {
                reason: format!(
                    "Best match in the {} rule table (score {} of 10)",
                    conditions.season, scored.score
                ),
                tips: STANDARD_TIPS.iter().take(3).map(|t| t.to_string()).collect(),
            },
            note: Some(note),
            raw_text: None,
            elapsed_ms: 0,
        }
    }

    fn attached_requirements(&self, crop: &str) -> Option<CropRequirements> {
        self.knowledge.lookup(crop).map(|r| r.to_requirements())
    }
}

fn fallback_note(err: &BackendError) -> String {
    format!("AI generation unavailable ({}): {}", err.kind(), err)
}

/// Parse the JSON plan and its crop name; no crop, or "unknown", is malformed
fn parse_plan(text: &str) -> Result<(String, PlanReply), ParseError> {
    let mut reply: PlanReply = parser::parse_json(text)?;
    match reply.crop.take() {
        Some(crop) if !crop.eq_ignore_ascii_case("unknown") => Ok((crop, reply)),
        _ => Err(ParseError::MalformedOutput(
            "Plan has no crop name".to_string(),
        )),
    }
}
