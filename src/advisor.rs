//! Narrative Operations
//!
//! Free-text advice straight from the backend: chat, loan eligibility and
//! plant disease analysis. Unlike [`crate::Resolver`] there is no heuristic
//! tier here, so backend failures come back as errors.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use serde::Serialize;

use crate::backends::{
    strip_data_url, BackendError, GenerationOptions, GenerationRequest, GenerationResult,
    LlmBackend, ModelSelection,
};
use crate::conditions::{sanitize_text, ValidationError};
use crate::config::{AdvisorConfig, TimeoutConfig};
use crate::error::{AdvisorError, AdvisorResult};
use crate::prompts;

/// Longest chat message accepted, in characters
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Output budget for the chat retry on the fallback model
const CHAT_RETRY_NUM_PREDICT: u32 = 200;

/// How a disease analysis was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseMode {
    Vision,
    TextOnly,
}

/// Generated narrative text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub text: String,
    pub model: String,
    /// Set for disease analyses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DiseaseMode>,
    /// True when the chat retry model answered
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    pub elapsed_ms: u64,
}

impl Narrative {
    fn from_result(result: GenerationResult) -> Self {
        Self {
            elapsed_ms: result.elapsed.as_millis() as u64,
            text: result.text,
            model: result.model,
            mode: None,
            fallback: false,
        }
    }
}

/// Chat, loan and disease advice over one backend
pub struct Advisor {
    backend: Arc<dyn LlmBackend>,
    selection: Arc<ModelSelection>,
    chat_fallback_model: String,
    vision_model: String,
    timeouts: TimeoutConfig,
}

impl Advisor {
    pub fn new(
        backend: Arc<dyn LlmBackend>,
        selection: Arc<ModelSelection>,
        config: &AdvisorConfig,
    ) -> Self {
        Self {
            backend,
            selection,
            chat_fallback_model: config.ollama.chat_fallback_model.clone(),
            vision_model: config.ollama.vision_model.clone(),
            timeouts: config.timeouts.clone(),
        }
    }

    fn call(
        &self,
        model: &str,
        prompt: String,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Result<GenerationResult, BackendError> {
        let request = GenerationRequest::new(model, prompt, timeout).with_options(options);
        self.backend.generate(&request)
    }

    /// Answer a farming question.
    ///
    /// A timeout on the primary model gets exactly one retry against the
    /// configured fallback model with a smaller output budget. Other
    /// failures are returned as-is.
    pub fn chat(&self, message: &str) -> AdvisorResult<Narrative> {
        let message = sanitize_text(message, MAX_MESSAGE_LEN);
        if message.is_empty() {
            return Err(ValidationError::Missing("message").into());
        }
        let prompt = prompts::chat(&message);

        match self.call(
            &self.selection.model,
            prompt.clone(),
            GenerationOptions::chat(),
            self.timeouts.interactive(),
        ) {
            Ok(result) => Ok(Narrative::from_result(result)),
            Err(e) if e.is_timeout() => {
                log::warn!(
                    "chat timed out on {}, retrying once with {}",
                    self.selection.model,
                    self.chat_fallback_model
                );
                let result = self.call(
                    &self.chat_fallback_model,
                    prompt,
                    GenerationOptions::chat().with_num_predict(CHAT_RETRY_NUM_PREDICT),
                    self.timeouts.chat_fallback(),
                )?;
                Ok(Narrative {
                    fallback: true,
                    ..Narrative::from_result(result)
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Review a loan application (a JSON object) for eligibility
    pub fn loan_eligibility(&self, application: &serde_json::Value) -> AdvisorResult<Narrative> {
        let Some(fields) = application.as_object() else {
            return Err(AdvisorError::InvalidRequest(
                "loan application must be a JSON object".to_string(),
            ));
        };
        if fields.is_empty() {
            return Err(AdvisorError::InvalidRequest(
                "loan application is empty".to_string(),
            ));
        }

        let sanitized: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => {
                        serde_json::Value::String(sanitize_text(s, MAX_MESSAGE_LEN))
                    }
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect();
        let application = serde_json::Value::Object(sanitized).to_string();

        let result = self.call(
            &self.selection.model,
            prompts::loan(&application),
            GenerationOptions::loan(),
            self.timeouts.generation(),
        )?;
        Ok(Narrative::from_result(result))
    }

    /// Diagnose a plant image.
    ///
    /// `image` is base64, optionally as a data URL. With `use_vision` and the
    /// vision model present on the backend, the image goes to that model;
    /// otherwise a generic text-only guide is produced.
    pub fn analyze_disease(&self, image: &str, use_vision: bool) -> AdvisorResult<Narrative> {
        let payload = strip_data_url(image);
        if payload.is_empty() {
            return Err(ValidationError::Missing("image").into());
        }
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AdvisorError::InvalidRequest(format!("image is not valid base64: {}", e)))?;

        if use_vision && self.vision_available() {
            log::info!("analyzing image with {}", self.vision_model);
            let request = GenerationRequest::new(
                self.vision_model.as_str(),
                prompts::DISEASE_VISION,
                self.timeouts.vision(),
            )
            .with_options(GenerationOptions::vision())
            .with_image(payload);
            let result = self.backend.generate(&request)?;
            return Ok(Narrative {
                mode: Some(DiseaseMode::Vision),
                ..Narrative::from_result(result)
            });
        }

        log::info!("using text-only disease guide");
        let result = self.call(
            &self.selection.model,
            prompts::DISEASE_TEXT.to_string(),
            GenerationOptions::disease_text(),
            self.timeouts.generation(),
        )?;
        let mut narrative = Narrative::from_result(result);
        narrative.text = format!("{}\n\n{}", prompts::DISEASE_TEXT_NOTE, narrative.text);
        narrative.mode = Some(DiseaseMode::TextOnly);
        Ok(narrative)
    }

    /// Whether the backend currently serves the vision model
    fn vision_available(&self) -> bool {
        match self.backend.list_models() {
            Ok(models) => models.iter().any(|m| m == &self.vision_model),
            Err(e) => {
                log::warn!("vision model check failed: {}", e);
                false
            }
        }
    }
}
