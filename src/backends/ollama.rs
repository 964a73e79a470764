//! Ollama Backend
//!
//! Local LLM support through the Ollama HTTP API (`/api/tags`, `/api/generate`).

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::{
    map_body_error, map_ureq_error, BackendError, GenerationOptions, GenerationRequest,
    GenerationResult, LlmBackend,
};
use crate::config::{OllamaConfig, TimeoutConfig};

const NAME: &str = "ollama";

/// Ollama local LLM backend
pub struct OllamaBackend {
    host: String,
    probe_timeout: Duration,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: &'a Vec<String>,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
}

#[derive(Deserialize)]
struct TagsReply {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Deserialize)]
struct TagEntry {
    name: String,
}

impl OllamaBackend {
    /// Backend from the `[ollama]` and `[timeouts]` config sections
    pub fn from_config(config: &OllamaConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            host: config.base_url.trim_end_matches('/').to_string(),
            probe_timeout: timeouts.probe(),
        }
    }

    /// Backend for an explicit host with the default probe timeout
    pub fn with_host(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            probe_timeout: TimeoutConfig::default().probe(),
        }
    }

    fn agent(timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new().timeout(timeout).build()
    }
}

impl LlmBackend for OllamaBackend {
    fn name(&self) -> &str {
        NAME
    }

    fn base_url(&self) -> &str {
        &self.host
    }

    fn is_available(&self) -> bool {
        Self::agent(self.probe_timeout)
            .get(&format!("{}/api/tags", self.host))
            .call()
            .is_ok()
    }

    fn list_models(&self) -> Result<Vec<String>, BackendError> {
        let response = Self::agent(self.probe_timeout)
            .get(&format!("{}/api/tags", self.host))
            .call()
            .map_err(|e| map_ureq_error(NAME, self.probe_timeout, e))?;

        let tags: TagsReply = response
            .into_json()
            .map_err(|e| map_body_error(NAME, self.probe_timeout, e))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, BackendError> {
        let started = Instant::now();
        log::debug!(
            "ollama generate: model={} prompt_len={} images={} timeout={:?}",
            request.model,
            request.prompt.len(),
            request.images.len(),
            request.timeout
        );

        let response = Self::agent(request.timeout)
            .post(&format!("{}/api/generate", self.host))
            .set("content-type", "application/json")
            .send_json(GenerateBody {
                model: &request.model,
                prompt: &request.prompt,
                stream: false,
                options: &request.options,
                images: &request.images,
            })
            .map_err(|e| map_ureq_error(NAME, request.timeout, e))?;

        let reply: GenerateReply = response
            .into_json()
            .map_err(|e| map_body_error(NAME, request.timeout, e))?;

        let text = reply.response.trim().to_string();
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
    fn test_ollama_from_config() {
        let mut config = OllamaConfig::default();
        config.base_url = "http://farm-box:11434/".to_string();
        let backend = OllamaBackend::from_config(&config, &TimeoutConfig::default());
        assert_eq!(backend.name(), "ollama");
        assert_eq!(backend.base_url(), "http://farm-box:11434");
        assert_eq!(backend.probe_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_generate_body_shape() {
        let options = GenerationOptions::prediction();
        let images = Vec::new();
        let body = GenerateBody {
            model: "llama3.2:1b",
            prompt: "hi",
            stream: false,
            options: &options,
            images: &images,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 200);
        assert!(json.get("images").is_none());
    }

    #[test]
    fn test_unreachable_host() {
        // Port 9 (discard) is closed on test machines.
        let backend = OllamaBackend::with_host("http://127.0.0.1:9");
        let err = backend.list_models().unwrap_err();
        assert!(matches!(err, BackendError::Unreachable { .. }));
        assert!(!backend.is_available());
    }
}
