//! Gemini Backend
//!
//! Google Gemini `generateContent` API. The key is read from the environment
//! variable named in `[gemini] api_key_env`; without one the backend reports
//! itself as not configured.

use std::time::{Duration, Instant};

use serde_json::{json, Value};

use super::{
    image_mime_type, map_body_error, map_ureq_error, strip_data_url, BackendError,
    GenerationOptions, GenerationRequest, GenerationResult, LlmBackend,
};
use crate::config::{GeminiConfig, TimeoutConfig};

const NAME: &str = "gemini";

/// Gemini API backend
pub struct GeminiBackend {
    api_key: Option<String>,
    base_url: String,
    probe_timeout: Duration,
}

impl GeminiBackend {
    /// Backend from the `[gemini]` and `[timeouts]` config sections
    pub fn from_config(config: &GeminiConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            probe_timeout: timeouts.probe(),
        }
    }

    /// Backend with an explicit key against the public endpoint
    pub fn with_key(api_key: &str) -> Self {
        Self::from_config(
            &GeminiConfig {
                api_key: Some(api_key.to_string()),
                ..Default::default()
            },
            &TimeoutConfig::default(),
        )
    }

    fn key(&self) -> Result<&str, BackendError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| BackendError::NotConfigured {
                backend: NAME.to_string(),
            })
    }

    fn agent(timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new().timeout(timeout).build()
    }

    /// Request body for `generateContent`
    fn build_body(request: &GenerationRequest) -> Value {
        let mut parts = vec![json!({ "text": request.prompt })];
        for image in &request.images {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image_mime_type(image),
                    "data": strip_data_url(image),
                }
            }));
        }

        json!({
            "contents": [{ "parts": parts }],
            "generationConfig": generation_config(&request.options),
        })
    }

    /// Concatenated text of the first candidate
    fn extract_text(body: &Value) -> Option<String> {
        let parts = body["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect::<Vec<_>>()
            .join("");
        Some(text)
    }
}

fn generation_config(options: &GenerationOptions) -> Value {
    let mut config = serde_json::Map::new();
    if let Some(t) = options.temperature {
        config.insert("temperature".to_string(), json!(t));
    }
    if let Some(p) = options.top_p {
        config.insert("topP".to_string(), json!(p));
    }
    if let Some(n) = options.num_predict {
        config.insert("maxOutputTokens".to_string(), json!(n));
    }
    Value::Object(config)
}

impl LlmBackend for GeminiBackend {
    fn name(&self) -> &str {
        NAME
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn list_models(&self) -> Result<Vec<String>, BackendError> {
        let key = self.key()?;
        let response = Self::agent(self.probe_timeout)
            .get(&format!("{}/models", self.base_url))
            .set("x-goog-api-key", key)
            .call()
            .map_err(|e| map_ureq_error(NAME, self.probe_timeout, e))?;

        let body: Value = response
            .into_json()
            .map_err(|e| map_body_error(NAME, self.probe_timeout, e))?;

        Ok(body["models"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m["name"].as_str())
                    .map(|n| n.trim_start_matches("models/").to_string())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, BackendError> {
        let key = self.key()?;
        let started = Instant::now();
        log::debug!(
            "gemini generate: model={} prompt_len={} images={}",
            request.model,
            request.prompt.len(),
            request.images.len()
        );

        let response = Self::agent(request.timeout)
            .post(&format!(
                "{}/models/{}:generateContent",
                self.base_url, request.model
            ))
            .set("content-type", "application/json")
            .set("x-goog-api-key", key)
            .send_json(Self::build_body(request))
            .map_err(|e| map_ureq_error(NAME, request.timeout, e))?;

        let body: Value = response
            .into_json()
            .map_err(|e| map_body_error(NAME, request.timeout, e))?;

        let text = Self::extract_text(&body)
            .ok_or_else(|| BackendError::InvalidResponse {
                backend: NAME.to_string(),
                message: "No candidates in Gemini output".to_string(),
            })?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(BackendError::EmptyResponse {
                backend: NAME.to_string(),
            });
        }

        Ok(GenerationResult {
            text,
            backend: NAME.to_string(),
            model: request.model.clone(),
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_key_is_not_configured() {
        let backend = GeminiBackend::from_config(&GeminiConfig::default(), &TimeoutConfig::default());
        assert!(!backend.is_available());
        let request = GenerationRequest::new("gemini-2.5-flash", "hi", Duration::from_secs(1));
        assert_eq!(
            backend.generate(&request).unwrap_err(),
            BackendError::NotConfigured {
                backend: "gemini".to_string()
            }
        );
    }

    #[test]
    fn test_build_body() {
        let request = GenerationRequest::new("gemini-2.5-flash", "Plan rice", Duration::from_secs(1))
            .with_options(GenerationOptions::plan())
            .with_image("aGVsbG8=");
        let body = GeminiBackend::build_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan rice");
        assert_eq!(
            body["contents"][0]["parts"][1]["inline_data"]["data"],
            "aGVsbG8="
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 800);
        assert!(body["generationConfig"].get("num_ctx").is_none());
    }

    #[test]
    fn test_build_body_image_types() {
        let request = GenerationRequest::new("gemini-2.5-flash", "Diagnose", Duration::from_secs(1))
            .with_image("iVBORw0KGgoAAAANSUhEUgAAAAE")
            .with_image("data:image/jpeg;base64,/9j/4AAQSkZJRgABAQ");
        let body = GeminiBackend::build_body(&request);
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "iVBORw0KGgoAAAANSUhEUgAAAAE");
        assert_eq!(parts[2]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[2]["inline_data"]["data"], "/9j/4AAQSkZJRgABAQ");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"crop\": " }, { "text": "\"Rice\"}" }] }
            }]
        });
        assert_eq!(
            GeminiBackend::extract_text(&body).as_deref(),
            Some("{\"crop\": \"Rice\"}")
        );
        assert_eq!(GeminiBackend::extract_text(&json!({})), None);
    }
}
