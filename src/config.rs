//! Agri Advisor Configuration
//!
//! Handles parsing and management of agri.toml configuration files.
//! Everything here is resolved once at startup and handed to the backends
//! and resolver as plain values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration file name searched for from the working directory upward
pub const CONFIG_FILE: &str = "agri.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching agri.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdvisorConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: BackendSection,

    /// Local Ollama server
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Google Generative Language API
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Per-call-site timeouts
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl AdvisorConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: AdvisorConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load(&config_path);
            }
            if !dir.pop() {
                // Reached root without finding config
                return Ok(Self::default());
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply `OLLAMA_HOST`, `OLLAMA_MODEL` and the Gemini API key variable.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("OLLAMA_HOST").filter(|v| !v.trim().is_empty()) {
            self.ollama.base_url = normalize_base_url(&host);
        }
        if let Some(model) = lookup("OLLAMA_MODEL").filter(|v| !v.trim().is_empty()) {
            self.ollama.default_model = model.trim().to_string();
        }
        if let Some(key) = lookup(&self.gemini.api_key_env).filter(|v| !v.trim().is_empty()) {
            self.gemini.api_key = Some(key.trim().to_string());
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> ConfigResult<()> {
        match self.backend.default.as_str() {
            "ollama" | "gemini" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown backend '{}', expected 'ollama' or 'gemini'",
                    other
                )))
            }
        }
        for (name, secs) in [
            ("probe", self.timeouts.probe),
            ("interactive", self.timeouts.interactive),
            ("generation", self.timeouts.generation),
            ("chat_fallback", self.timeouts.chat_fallback),
            ("vision", self.timeouts.vision),
        ] {
            if secs == 0 {
                return Err(ConfigError::Invalid(format!(
                    "timeouts.{} must be at least 1 second",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

/// Which backend answers generation requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    /// "ollama" or "gemini"
    #[serde(default = "default_backend")]
    pub default: String,
}

fn default_backend() -> String {
    "ollama".to_string()
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            default: default_backend(),
        }
    }
}

/// Local Ollama server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    /// Used when the startup probe finds nothing
    #[serde(default = "default_ollama_model")]
    pub default_model: String,

    /// Tried in order against the server's model list
    #[serde(default = "default_model_preferences")]
    pub model_preferences: Vec<String>,

    /// Model used for image-conditioned generation
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Secondary model for the single chat retry after a timeout
    #[serde(default = "default_chat_fallback_model")]
    pub chat_fallback_model: String,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1:latest".to_string()
}

fn default_model_preferences() -> Vec<String> {
    vec![
        "llama3.2:1b".to_string(),
        "llama3.2:latest".to_string(),
        "llama3.1:latest".to_string(),
        "llama3:latest".to_string(),
    ]
}

fn default_vision_model() -> String {
    "llama3.2-vision:latest".to_string()
}

fn default_chat_fallback_model() -> String {
    "llama3:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            default_model: default_ollama_model(),
            model_preferences: default_model_preferences(),
            vision_model: default_vision_model(),
            chat_fallback_model: default_chat_fallback_model(),
        }
    }
}

/// Google Generative Language API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_gemini_key_env")]
    pub api_key_env: String,

    /// Filled from the environment, never written to disk
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_url(),
            model: default_gemini_model(),
            api_key_env: default_gemini_key_env(),
            api_key: None,
        }
    }
}

/// Timeouts in seconds, one per class of call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Model listing / availability checks
    #[serde(default = "default_probe")]
    pub probe: u64,

    /// Short interactive calls (chat, quick prediction)
    #[serde(default = "default_interactive")]
    pub interactive: u64,

    /// Multi-paragraph generation
    #[serde(default = "default_generation")]
    pub generation: u64,

    /// The single chat retry against the secondary model
    #[serde(default = "default_chat_fallback")]
    pub chat_fallback: u64,

    /// Image-conditioned generation, including cold model loads
    #[serde(default = "default_vision")]
    pub vision: u64,
}

fn default_probe() -> u64 {
    5
}

fn default_interactive() -> u64 {
    60
}

fn default_generation() -> u64 {
    120
}

fn default_chat_fallback() -> u64 {
    120
}

fn default_vision() -> u64 {
    600
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe: default_probe(),
            interactive: default_interactive(),
            generation: default_generation(),
            chat_fallback: default_chat_fallback(),
            vision: default_vision(),
        }
    }
}

impl TimeoutConfig {
    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe)
    }

    pub fn interactive(&self) -> Duration {
        Duration::from_secs(self.interactive)
    }

    pub fn generation(&self) -> Duration {
        Duration::from_secs(self.generation)
    }

    pub fn chat_fallback(&self) -> Duration {
        Duration::from_secs(self.chat_fallback)
    }

    pub fn vision(&self) -> Duration {
        Duration::from_secs(self.vision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.backend.default, "ollama");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.ollama.model_preferences[0], "llama3.2:1b");
        assert_eq!(config.timeouts.vision(), Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
[backend]
default = "gemini"

[ollama]
model_preferences = ["phi3:mini", "mistral:latest"]

[timeouts]
generation = 90
"#;
        let config: AdvisorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.default, "gemini");
        assert_eq!(config.ollama.model_preferences, vec!["phi3:mini", "mistral:latest"]);
        assert_eq!(config.ollama.vision_model, "llama3.2-vision:latest");
        assert_eq!(config.timeouts.generation, 90);
        assert_eq!(config.timeouts.interactive, 60);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = AdvisorConfig::default();
        config.timeouts.chat_fallback = 30;
        config.gemini.api_key = Some("secret".to_string());
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("secret"));

        let loaded = AdvisorConfig::load(&path).unwrap();
        assert_eq!(loaded.timeouts.chat_fallback, 30);
        assert_eq!(loaded.gemini.api_key, None);
    }

    #[test]
    fn test_find_and_load_searches_parents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[ollama]\nbase_url = \"http://farm-box:11434\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = AdvisorConfig::find_and_load(&nested).unwrap();
        assert_eq!(config.ollama.base_url, "http://farm-box:11434");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AdvisorConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        std::fs::write(&path, "[backend]\ndefault = \"openai\"\n").unwrap();
        assert!(matches!(AdvisorConfig::load(&path), Err(ConfigError::Invalid(_))));

        std::fs::write(&path, "[timeouts]\nprobe = 0\n").unwrap();
        assert!(matches!(AdvisorConfig::load(&path), Err(ConfigError::Invalid(_))));

        std::fs::write(&path, "[timeouts\n").unwrap();
        assert!(matches!(AdvisorConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("OLLAMA_HOST", "10.0.0.5:11434/"),
            ("OLLAMA_MODEL", "qwen2:0.5b"),
            ("GEMINI_API_KEY", " abc123 "),
        ]
        .into_iter()
        .collect();

        let mut config = AdvisorConfig::default();
        config.apply_env_with(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.ollama.base_url, "http://10.0.0.5:11434");
        assert_eq!(config.ollama.default_model, "qwen2:0.5b");
        assert_eq!(config.gemini.api_key.as_deref(), Some("abc123"));
    }
}
