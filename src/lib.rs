//! Agri Advisor - Hybrid Crop Recommendation Engine
//!
//! Accepts farm conditions (soil pH, temperature, rainfall, NPK, soil type,
//! season) and produces crop recommendations, growing requirements and
//! advisory narratives.
//!
//! # Three-Tier Resolution
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TIER 1: KNOWLEDGE STORE                      │
//! │  Static table of 19 crops, normalized exact-match lookup        │
//! │  Instant, deterministic, no network                             │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                │ miss
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TIER 2: LLM GENERATION                       │
//! │  Ollama (local) or Gemini (cloud), explicit timeout per call    │
//! │  Output parsed from embedded JSON or labeled sections           │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                │ unreachable / timeout / bad status
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TIER 3: HEURISTIC SCORER                     │
//! │  Season-indexed rule table, additive scoring, always answers    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every result carries a [`Provenance`] tag naming the tier that produced it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use agri_advisor::backends::{ModelSelection, OllamaBackend};
//! use agri_advisor::config::AdvisorConfig;
//! use agri_advisor::resolver::{Query, Resolver};
//!
//! let config = AdvisorConfig::default();
//! let backend = Arc::new(OllamaBackend::from_config(&config.ollama, &config.timeouts));
//! let selection = Arc::new(ModelSelection::probe(
//!     backend.as_ref(),
//!     &config.ollama.model_preferences,
//!     &config.ollama.default_model,
//! ));
//! let resolver = Resolver::new(backend, selection, config.timeouts.clone());
//!
//! let result = resolver.resolve(&Query::Requirements { crop: "Rice".into() });
//! println!("{} via {}", result.crop, result.provenance);
//! ```

#![warn(clippy::all)]

pub mod advisor;
pub mod backends;
pub mod conditions;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod knowledge;
pub mod parser;
pub mod prompts;
pub mod resolver;

pub use advisor::{Advisor, DiseaseMode, Narrative};
pub use backends::{
    select_model, BackendError, BackendRegistry, GenerationOptions, GenerationRequest,
    GenerationResult, LlmBackend, ModelSelection,
};
pub use conditions::{ConditionSet, RawConditions, ValidationError};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, AdvisorResult};
pub use heuristic::{Confidence, HeuristicScorer, ScoreOutcome};
pub use knowledge::{KnowledgeRecord, KnowledgeStore};
pub use parser::{LabeledSections, ParseError, PredictionFields};
pub use resolver::{Content, Provenance, Query, Resolver, StructuredRecommendation};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
