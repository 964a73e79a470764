//! LLM Backends
//!
//! Text-generation services behind one blocking interface. Each call carries
//! its own timeout and either returns the full generated text or a typed
//! [`BackendError`]; there are no partial results.
//!
//! # Model Selection
//!
//! The model is chosen once at startup by [`ModelSelection::probe`], which
//! lists the backend's models and runs [`select_model`] over the configured
//! preference list. The selection is then shared read-only (`Arc`) with every
//! caller; it is never re-probed per request.

pub mod gemini;
pub mod ollama;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::AdvisorConfig;

pub use gemini::GeminiBackend;
pub use ollama::OllamaBackend;

/// Backend failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection refused, DNS failure, bad URL
    #[error("Backend '{backend}' unreachable: {message}")]
    Unreachable { backend: String, message: String },

    /// Deadline exceeded
    #[error("Backend '{backend}' timed out after {}s", timeout.as_secs_f32())]
    Timeout { backend: String, timeout: Duration },

    /// Non-2xx response
    #[error("Backend '{backend}' returned HTTP {status}: {body}")]
    BadStatus {
        backend: String,
        status: u16,
        body: String,
    },

    /// 2xx with no generated text
    #[error("Backend '{backend}' returned an empty response")]
    EmptyResponse { backend: String },

    /// Response body could not be decoded
    #[error("Backend '{backend}' sent an invalid response: {message}")]
    InvalidResponse { backend: String, message: String },

    /// Missing credentials or endpoint
    #[error("Backend '{backend}' is not configured")]
    NotConfigured { backend: String },
}

impl BackendError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout { .. })
    }

    /// Short machine-friendly kind, used in logs and result notes
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Unreachable { .. } => "unreachable",
            BackendError::Timeout { .. } => "timeout",
            BackendError::BadStatus { .. } => "bad_status",
            BackendError::EmptyResponse { .. } => "empty_response",
            BackendError::InvalidResponse { .. } => "invalid_response",
            BackendError::NotConfigured { .. } => "not_configured",
        }
    }
}

/// Sampling and length options, serialized as Ollama's `options` object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationOptions {
    /// Sampling randomness, 0.0-1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus-sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    /// Context window size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
}

impl GenerationOptions {
    fn preset(temperature: f32, top_p: f32, num_predict: u32, num_ctx: u32) -> Self {
        Self {
            temperature: Some(temperature),
            top_p: Some(top_p),
            num_predict: Some(num_predict),
            num_ctx: Some(num_ctx),
            repeat_penalty: None,
        }
    }

    /// Short labeled-field crop prediction
    pub fn prediction() -> Self {
        Self::preset(0.3, 0.9, 200, 1024)
    }

    /// Multi-section growing requirements
    pub fn requirements() -> Self {
        Self::preset(0.3, 0.9, 600, 2048)
    }

    /// JSON crop plan
    pub fn plan() -> Self {
        Self::preset(0.3, 0.9, 800, 2048)
    }

    /// Conversational answers
    pub fn chat() -> Self {
        Self::preset(0.7, 0.9, 300, 2048).with_repeat_penalty(1.1)
    }

    /// Loan eligibility narrative
    pub fn loan() -> Self {
        Self::preset(0.3, 0.8, 500, 2048).with_repeat_penalty(1.1)
    }

    /// Text-only disease guide
    pub fn disease_text() -> Self {
        Self::preset(0.3, 0.9, 500, 2048)
    }

    /// Image-conditioned disease analysis
    pub fn vision() -> Self {
        Self::preset(0.3, 0.9, 600, 2048)
    }

    pub fn with_num_predict(mut self, num_predict: u32) -> Self {
        self.num_predict = Some(num_predict);
        self
    }

    pub fn with_repeat_penalty(mut self, penalty: f32) -> Self {
        self.repeat_penalty = Some(penalty);
        self
    }
}

/// One generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub options: GenerationOptions,
    /// Base64 image payloads, data-URL prefix already stripped
    pub images: Vec<String>,
    pub timeout: Duration,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: GenerationOptions::default(),
            images: Vec::new(),
            timeout,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }
}

/// Generated text plus where and how fast it came back
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub text: String,
    /// Backend name
    pub backend: String,
    /// Model that produced the text
    pub model: String,
    pub elapsed: Duration,
}

/// LLM backend trait
pub trait LlmBackend: Send + Sync {
    /// Backend name ("ollama", "gemini", ...)
    fn name(&self) -> &str;

    /// Endpoint base URL
    fn base_url(&self) -> &str;

    /// Cheap availability check (credentials present / server answering)
    fn is_available(&self) -> bool;

    /// Model identifiers the backend currently serves
    fn list_models(&self) -> Result<Vec<String>, BackendError>;

    /// Blocking generation bounded by `request.timeout`
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, BackendError>;
}

/// Pick a model from what the backend serves.
///
/// Order: the first preference present in `available`, then the first
/// model whose name does not mention "vision", then the first model listed.
/// `None` only when `available` is empty.
pub fn select_model(available: &[String], preferences: &[String]) -> Option<String> {
    preferences
        .iter()
        .find(|p| available.contains(p))
        .or_else(|| {
            available
                .iter()
                .find(|m| !m.to_lowercase().contains("vision"))
        })
        .or_else(|| available.first())
        .cloned()
}

/// Process-wide model choice made at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    /// Model used for text generation
    pub model: String,
    /// Models reported by the probe (empty if it failed)
    pub available: Vec<String>,
    /// Whether the probe reached the backend
    pub probed: bool,
}

impl ModelSelection {
    /// List the backend's models and choose one; falls back to
    /// `default_model` when the backend cannot be reached or lists nothing.
    pub fn probe(backend: &dyn LlmBackend, preferences: &[String], default_model: &str) -> Self {
        match backend.list_models() {
            Ok(available) => {
                let model = select_model(&available, preferences)
                    .unwrap_or_else(|| default_model.to_string());
                log::info!(
                    "{} connected, {} model(s) available, using {}",
                    backend.name(),
                    available.len(),
                    model
                );
                Self {
                    model,
                    available,
                    probed: true,
                }
            }
            Err(e) => {
                log::warn!(
                    "{} model probe failed ({}), using configured default {}",
                    backend.name(),
                    e,
                    default_model
                );
                Self::fixed(default_model)
            }
        }
    }

    /// Selection without probing
    pub fn fixed(model: &str) -> Self {
        Self {
            model: model.to_string(),
            available: Vec::new(),
            probed: false,
        }
    }
}

/// Configured backends by name
pub struct BackendRegistry {
    backends: Vec<Arc<dyn LlmBackend>>,
    default: String,
}

impl BackendRegistry {
    /// Registry with the Ollama and Gemini backends from config
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let ollama: Arc<dyn LlmBackend> =
            Arc::new(OllamaBackend::from_config(&config.ollama, &config.timeouts));
        let gemini: Arc<dyn LlmBackend> =
            Arc::new(GeminiBackend::from_config(&config.gemini, &config.timeouts));
        Self {
            backends: vec![ollama, gemini],
            default: config.backend.default.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmBackend>> {
        self.backends.iter().find(|b| b.name() == name).cloned()
    }

    /// Backend names in registration order
    pub fn list(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    /// The configured default backend
    pub fn default_backend(&self) -> Option<Arc<dyn LlmBackend>> {
        self.get(&self.default)
    }
}

/// Remove a `data:image/...;base64,` prefix if present
pub fn strip_data_url(image: &str) -> &str {
    let trimmed = image.trim();
    match trimmed.split_once(',') {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => trimmed,
    }
}

/// MIME type of a base64 image payload, read from its leading magic bytes.
/// Unrecognized payloads are reported as JPEG.
pub fn image_mime_type(image: &str) -> &'static str {
    const SIGNATURES: &[(&str, &str)] = &[
        ("iVBORw0KGgo", "image/png"),
        ("/9j/", "image/jpeg"),
        ("R0lGOD", "image/gif"),
        ("UklGR", "image/webp"),
    ];
    let payload = strip_data_url(image);
    SIGNATURES
        .iter()
        .find(|(magic, _)| payload.starts_with(magic))
        .map(|(_, mime)| *mime)
        .unwrap_or("image/jpeg")
}

/// Map a ureq failure onto the backend error taxonomy
pub(crate) fn map_ureq_error(backend: &str, timeout: Duration, err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(status, response) => BackendError::BadStatus {
            backend: backend.to_string(),
            status,
            body: response
                .into_string()
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect(),
        },
        ureq::Error::Transport(transport) => {
            let timed_out = std::error::Error::source(&transport)
                .and_then(|s| s.downcast_ref::<io::Error>())
                .map(is_timeout_io)
                .unwrap_or(false)
                || transport.to_string().contains("timed out");
            if timed_out {
                BackendError::Timeout {
                    backend: backend.to_string(),
                    timeout,
                }
            } else {
                BackendError::Unreachable {
                    backend: backend.to_string(),
                    message: transport.to_string(),
                }
            }
        }
    }
}

/// Map a body-read failure: timeouts stay timeouts, the rest is a bad body
pub(crate) fn map_body_error(backend: &str, timeout: Duration, err: io::Error) -> BackendError {
    if is_timeout_io(&err) {
        BackendError::Timeout {
            backend: backend.to_string(),
            timeout,
        }
    } else {
        BackendError::InvalidResponse {
            backend: backend.to_string(),
            message: err.to_string(),
        }
    }
}

fn is_timeout_io(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_model_preference_order() {
        let prefs = names(&["llama3.2:1b", "llama3.2:latest", "llama3.1:latest"]);
        let available = names(&["llama3.1:latest", "llama3.2:latest", "mistral:7b"]);
        assert_eq!(
            select_model(&available, &prefs).as_deref(),
            Some("llama3.2:latest")
        );
    }

    #[test]
    fn test_select_model_skips_vision() {
        let prefs = names(&["llama3.2:1b"]);
        let available = names(&["llama3.2-vision:latest", "phi3:mini"]);
        assert_eq!(select_model(&available, &prefs).as_deref(), Some("phi3:mini"));
    }

    #[test]
    fn test_select_model_first_listed_when_all_vision() {
        let available = names(&["llava-Vision:7b", "llama3.2-vision:latest"]);
        assert_eq!(
            select_model(&available, &[]).as_deref(),
            Some("llava-Vision:7b")
        );
        assert_eq!(select_model(&[], &names(&["llama3.2:1b"])), None);
    }

    #[test]
    fn test_generation_options_serialize_only_set_fields() {
        let json = serde_json::to_value(GenerationOptions::prediction()).unwrap();
        assert_eq!(json["num_predict"], 200);
        assert_eq!(json["num_ctx"], 1024);
        assert!(json.get("repeat_penalty").is_none());

        let chat = serde_json::to_value(GenerationOptions::chat().with_num_predict(200)).unwrap();
        assert_eq!(chat["num_predict"], 200);
        assert!(chat.get("repeat_penalty").is_some());
    }

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/png;base64,iVBORw0K"), "iVBORw0K");
        assert_eq!(strip_data_url("  iVBORw0K "), "iVBORw0K");
        assert_eq!(strip_data_url("abc,def"), "abc,def");
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type("iVBORw0KGgoAAAANSUhEUg"), "image/png");
        assert_eq!(image_mime_type("/9j/4AAQSkZJRg"), "image/jpeg");
        assert_eq!(image_mime_type("R0lGODlhAQABAIAAAP"), "image/gif");
        assert_eq!(image_mime_type("UklGRiQAAABXRUJQ"), "image/webp");
        assert_eq!(image_mime_type("data:image/png;base64,iVBORw0KGgo"), "image/png");
        assert_eq!(image_mime_type("aGVsbG8="), "image/jpeg");
    }

    #[test]
    fn test_registry_from_config() {
        let registry = BackendRegistry::from_config(&AdvisorConfig::default());
        assert_eq!(registry.list(), vec!["ollama", "gemini"]);
        assert_eq!(registry.default_name(), "ollama");
        assert_eq!(registry.default_backend().unwrap().name(), "ollama");
        assert!(registry.get("claude").is_none());
    }

    #[test]
    fn test_error_kinds() {
        let err = BackendError::Timeout {
            backend: "ollama".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert!(err.is_timeout());
        assert_eq!(err.kind(), "timeout");
        assert_eq!(err.to_string(), "Backend 'ollama' timed out after 60s");
    }
}
