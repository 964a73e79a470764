//! Resolver Integration Tests
//!
//! Drives the three resolution tiers end to end through the public API with
//! in-process backends, plus one real HTTP backend pointed at a dead port.

use agri_advisor::backends::{
    BackendError, GenerationRequest, GenerationResult, LlmBackend, ModelSelection, OllamaBackend,
};
use agri_advisor::config::TimeoutConfig;
use agri_advisor::heuristic::Confidence;
use agri_advisor::knowledge::KnowledgeStore;
use agri_advisor::resolver::{Content, Provenance, Query, Resolver};
use agri_advisor::ConditionSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Backend that counts calls and answers with a fixed outcome
struct CountingBackend {
    calls: AtomicUsize,
    outcome: Result<String, BackendError>,
}

impl CountingBackend {
    fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(text.to_string()),
        })
    }

    fn failing(err: BackendError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Err(err),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn base_url(&self) -> &str {
        "mem://counting"
    }

    fn is_available(&self) -> bool {
        self.outcome.is_ok()
    }

    fn list_models(&self) -> Result<Vec<String>, BackendError> {
        Ok(vec!["mock:latest".to_string()])
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = self.outcome.clone()?;
        Ok(GenerationResult {
            text,
            backend: "counting".to_string(),
            model: request.model.clone(),
            elapsed: Duration::from_millis(5),
        })
    }
}

fn resolver_for(backend: Arc<CountingBackend>) -> Resolver {
    Resolver::new(
        backend,
        Arc::new(ModelSelection::fixed("mock:latest")),
        TimeoutConfig::default(),
    )
}

fn failures() -> Vec<BackendError> {
    vec![
        BackendError::Unreachable {
            backend: "counting".to_string(),
            message: "connection refused".to_string(),
        },
        BackendError::Timeout {
            backend: "counting".to_string(),
            timeout: Duration::from_secs(120),
        },
        BackendError::BadStatus {
            backend: "counting".to_string(),
            status: 503,
            body: "overloaded".to_string(),
        },
    ]
}

// === Knowledge tier ===

#[test]
fn test_every_known_crop_resolves_without_backend() {
    let backend = CountingBackend::answering("should never be used");
    let resolver = resolver_for(backend.clone());

    for name in KnowledgeStore::builtin().names() {
        for variant in [
            name.to_string(),
            name.to_uppercase(),
            format!("  {}\t", name),
        ] {
            let result = resolver.resolve(&Query::requirements(&variant).unwrap());
            assert_eq!(result.provenance, Provenance::KnowledgeBase, "{}", variant);
            match &result.content {
                Content::Requirements(req) => assert!(!req.is_empty()),
                other => panic!("unexpected content {:?}", other),
            }
        }
    }

    assert_eq!(backend.calls(), 0);
}

// === Generation tier ===

#[test]
fn test_unknown_crop_uses_generation() {
    let backend = CountingBackend::answering(
        "CROP: Quinoa\nSOIL_REQUIREMENTS:\n- N: 80 kg/ha\n- P: 40 kg/ha\nCLIMATE_REQUIREMENTS:\n- Temp: 20-30C",
    );
    let result = resolver_for(backend.clone()).resolve(&Query::requirements("quinoa").unwrap());

    assert_eq!(backend.calls(), 1);
    assert_eq!(result.provenance, Provenance::AiGenerated);
    assert_eq!(result.model.as_deref(), Some("mock:latest"));
    match result.content {
        Content::Requirements(req) => {
            assert_eq!(req.soil_requirements, vec!["N: 80 kg/ha", "P: 40 kg/ha"]);
            assert_eq!(req.climate_requirements, vec!["Temp: 20-30C"]);
        }
        other => panic!("unexpected content {:?}", other),
    }
}

// === Heuristic tier ===

#[test]
fn test_backend_failures_fall_back_for_unknown_crop() {
    for err in failures() {
        let backend = CountingBackend::failing(err.clone());
        let result = resolver_for(backend.clone()).resolve(&Query::requirements("dragonfruit").unwrap());

        assert_eq!(backend.calls(), 1);
        assert_eq!(result.provenance, Provenance::HeuristicFallback, "{:?}", err);
        assert_eq!(result.crop, "Dragonfruit");
        assert!(result.note.as_deref().unwrap_or_default().contains(err.kind()));
        match result.content {
            Content::Requirements(req) => {
                assert!(!req.soil_requirements.is_empty());
                assert!(!req.climate_requirements.is_empty());
            }
            other => panic!("unexpected content {:?}", other),
        }
    }
}

#[test]
fn test_monsoon_rice_scenario() {
    let conditions = ConditionSet::new(6.5, 27.0, 1100.0)
        .unwrap()
        .with_soil("clay")
        .with_season("monsoon");

    for query in [
        Query::Recommend {
            conditions: conditions.clone(),
        },
        Query::Predict {
            conditions: conditions.clone(),
        },
    ] {
        let backend = CountingBackend::failing(failures().remove(0));
        let result = resolver_for(backend).resolve(&query);
        assert_eq!(result.provenance, Provenance::HeuristicFallback);
        assert_eq!(result.crop, "Rice");
        assert_eq!(result.confidence, Some(Confidence::High));
    }
}

#[test]
fn test_fallback_plan_is_deterministic() {
    let conditions = ConditionSet::new(7.0, 18.0, 300.0)
        .unwrap()
        .with_soil("loamy")
        .with_season("winter");
    let query = Query::Recommend { conditions };

    let first = resolver_for(CountingBackend::answering("garbage, no json")).resolve(&query);
    let second = resolver_for(CountingBackend::answering("still nothing")).resolve(&query);

    assert_eq!(first.provenance, Provenance::HeuristicFallback);
    assert_eq!(first.crop, second.crop);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.content, second.content);
}

#[test]
fn test_unreachable_endpoint_falls_back_quickly() {
    let backend = Arc::new(OllamaBackend::with_host("http://127.0.0.1:9"));
    let selection = Arc::new(ModelSelection::probe(
        backend.as_ref(),
        &["llama3.2:1b".to_string()],
        "llama3.1:latest",
    ));
    assert!(!selection.probed);
    assert_eq!(selection.model, "llama3.1:latest");

    let resolver = Resolver::new(backend, selection, TimeoutConfig::default());
    let started = Instant::now();
    let result = resolver.resolve(&Query::requirements("kiwano").unwrap());

    assert_eq!(result.provenance, Provenance::HeuristicFallback);
    assert!(started.elapsed() < Duration::from_secs(10));
}
