//! TOML-based configuration for claimflow
//!
//! This module provides declarative configuration for providers, model
//! profiles and agents via a TOML file (`claimflow.toml`).
//!
//! Every section has a default, so a missing file yields the stock setup: a
//! local Ollama server, a `reasoning` profile for research and a `writing`
//! profile for the writer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Root configuration structure loaded from claimflow.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimflowConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Named LLM provider configurations, merged over the built-in `ollama-local`
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,

    /// Named model profiles, merged over the built-in `reasoning` and `writing`
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfig>,

    /// Which model profile each agent uses
    #[serde(default)]
    pub agents: AgentsConfig,
}

impl Default for ClaimflowConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            providers: default_providers(),
            models: default_models(),
            agents: AgentsConfig::default(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ============= Provider Configuration =============

pub const DEFAULT_PROVIDER: &str = "ollama-local";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_providers() -> BTreeMap<String, ProviderConfig> {
    BTreeMap::from([(
        DEFAULT_PROVIDER.to_string(),
        ProviderConfig::Ollama {
            base_url: default_ollama_url(),
        },
    )])
}

// ============= Model Configuration =============

pub const REASONING_PROFILE: &str = "reasoning";
pub const WRITING_PROFILE: &str = "writing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Reference to a provider name defined in [providers]
    pub provider: String,

    /// Model name/identifier to use with the provider
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_models() -> BTreeMap<String, ModelConfig> {
    BTreeMap::from([
        (
            REASONING_PROFILE.to_string(),
            ModelConfig {
                provider: DEFAULT_PROVIDER.to_string(),
                model: "deepseek-r1:8b".to_string(),
                temperature: 0.0,
            },
        ),
        (
            WRITING_PROFILE.to_string(),
            ModelConfig {
                provider: DEFAULT_PROVIDER.to_string(),
                model: "llama3.2:1b".to_string(),
                temperature: 0.7,
            },
        ),
    ])
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Reference to a model profile defined in [models]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default = "default_research_agent")]
    pub research: AgentConfig,

    #[serde(default = "default_writer_agent")]
    pub writer: AgentConfig,
}

fn default_research_agent() -> AgentConfig {
    AgentConfig {
        model: REASONING_PROFILE.to_string(),
    }
}

fn default_writer_agent() -> AgentConfig {
    AgentConfig {
        model: WRITING_PROFILE.to_string(),
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            research: default_research_agent(),
            writer: default_writer_agent(),
        }
    }
}

impl AgentsConfig {
    /// Agent configs keyed by agent name
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AgentConfig)> {
        [("research", &self.research), ("writer", &self.writer)].into_iter()
    }

    pub fn get(&self, name: &str) -> Option<&AgentConfig> {
        match name {
            "research" => Some(&self.research),
            "writer" => Some(&self.writer),
            _ => None,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    UnusedProvider,
    UnusedModel,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider '{0}' referenced by model '{1}' does not exist")]
    MissingProvider(String, String),

    #[error("Model '{0}' referenced by agent '{1}' does not exist")]
    MissingModel(String, String),
}

impl ClaimflowConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {:?}", path);

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to the built-in defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::FileNotFound(missing)) => {
                debug!("No configuration at {:?}, using defaults", missing);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<ClaimflowConfig>(content)?.with_builtin_entries();
        config.validate()?;
        Ok(config)
    }

    /// Add built-in providers and model profiles the file does not redefine
    fn with_builtin_entries(mut self) -> Self {
        for (name, provider) in default_providers() {
            self.providers.entry(name).or_insert(provider);
        }
        for (name, model) in default_models() {
            self.models.entry(name).or_insert(model);
        }
        self
    }

    /// Validate internal references and sampling parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (model_name, model) in &self.models {
            if !self.providers.contains_key(&model.provider) {
                return Err(ConfigError::MissingProvider(
                    model.provider.clone(),
                    model_name.clone(),
                ));
            }

            if model.model.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Model '{}' has an empty model identifier",
                    model_name
                )));
            }

            if !(0.0..=2.0).contains(&model.temperature) {
                return Err(ConfigError::ValidationError(format!(
                    "Model '{}' has temperature {} outside 0.0..=2.0",
                    model_name, model.temperature
                )));
            }
        }

        for (agent_name, agent) in self.agents.iter() {
            if !self.models.contains_key(&agent.model) {
                return Err(ConfigError::MissingModel(
                    agent.model.clone(),
                    agent_name.to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate and report unused providers and models
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        for provider_name in self.providers.keys() {
            let used = self.models.values().any(|m| &m.provider == provider_name);
            if !used {
                warnings.push(ConfigWarning {
                    kind: ConfigWarningKind::UnusedProvider,
                    message: format!(
                        "Provider '{}' is not referenced by any model",
                        provider_name
                    ),
                });
            }
        }

        for model_name in self.models.keys() {
            let used = self.agents.iter().any(|(_, a)| &a.model == model_name);
            if !used {
                warnings.push(ConfigWarning {
                    kind: ConfigWarningKind::UnusedModel,
                    message: format!("Model '{}' is not referenced by any agent", model_name),
                });
            }
        }

        Ok(warnings)
    }

    /// Get provider by name
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Get model profile by name
    pub fn get_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }

    /// Resolve the model profile name an agent runs on
    pub fn agent_model(&self, agent_name: &str) -> Option<&str> {
        self.agents.get(agent_name).map(|a| a.model.as_str())
    }

    /// Render the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[logging]
level = "debug"
json = true

[providers.ollama-remote]
type = "ollama"
base_url = "http://10.0.0.5:11434"

[models.reasoning]
provider = "ollama-remote"
model = "qwen3:14b"
temperature = 0.0

[models.writing]
provider = "ollama-remote"
model = "llama3.2:3b"

[agents.research]
model = "reasoning"

[agents.writer]
model = "writing"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = ClaimflowConfig::from_toml(&create_test_config()).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(
            config.get_provider("ollama-remote"),
            Some(&ProviderConfig::Ollama {
                base_url: "http://10.0.0.5:11434".to_string()
            })
        );

        let writing = config.get_model("writing").unwrap();
        assert_eq!(writing.model, "llama3.2:3b");
        assert_eq!(writing.temperature, 0.7);
        assert_eq!(config.agent_model("research"), Some("reasoning"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ClaimflowConfig::from_toml("").unwrap();

        assert_eq!(config.logging.level, "info");
        assert!(config.get_provider(DEFAULT_PROVIDER).is_some());

        let reasoning = config.get_model(REASONING_PROFILE).unwrap();
        assert_eq!(reasoning.model, "deepseek-r1:8b");
        assert_eq!(reasoning.temperature, 0.0);

        let writing = config.get_model(WRITING_PROFILE).unwrap();
        assert_eq!(writing.model, "llama3.2:1b");
        assert_eq!(writing.temperature, 0.7);

        assert_eq!(config.agent_model("writer"), Some(WRITING_PROFILE));
        assert_eq!(config.agent_model("editor"), None);
    }

    #[test]
    fn test_single_profile_override_keeps_other_builtins() {
        let toml = r#"
[models.reasoning]
provider = "ollama-local"
model = "qwen3:14b"
"#;
        let config = ClaimflowConfig::from_toml(toml).unwrap();

        assert_eq!(config.get_model(REASONING_PROFILE).unwrap().model, "qwen3:14b");
        assert_eq!(config.get_model(WRITING_PROFILE).unwrap().model, "llama3.2:1b");
        assert!(config.get_provider(DEFAULT_PROVIDER).is_some());
    }

    #[test]
    fn test_builtin_provider_can_be_redefined() {
        let toml = r#"
[providers.ollama-local]
type = "ollama"
base_url = "http://gpu-box:11434"
"#;
        let config = ClaimflowConfig::from_toml(toml).unwrap();

        assert_eq!(
            config.get_provider(DEFAULT_PROVIDER),
            Some(&ProviderConfig::Ollama {
                base_url: "http://gpu-box:11434".to_string()
            })
        );
        assert_eq!(config.models.len(), 2);
    }

    #[test]
    fn test_missing_provider_rejected() {
        let toml = r#"
[models.reasoning]
provider = "nowhere"
model = "deepseek-r1:8b"
"#;
        match ClaimflowConfig::from_toml(toml) {
            Err(ConfigError::MissingProvider(provider, model)) => {
                assert_eq!(provider, "nowhere");
                assert_eq!(model, "reasoning");
            }
            other => panic!("Expected MissingProvider, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_agent_model_rejected() {
        let toml = r#"
[agents.writer]
model = "creative"
"#;
        assert!(matches!(
            ClaimflowConfig::from_toml(toml),
            Err(ConfigError::MissingModel(model, agent)) if model == "creative" && agent == "writer"
        ));
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let toml = r#"
[models.reasoning]
provider = "ollama-local"
model = "deepseek-r1:8b"
temperature = 3.5
"#;
        assert!(matches!(
            ClaimflowConfig::from_toml(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unused_entries_warn() {
        let mut config = ClaimflowConfig::default();
        config.providers.insert(
            "spare".to_string(),
            ProviderConfig::Ollama {
                base_url: default_ollama_url(),
            },
        );
        config.models.insert(
            "fast".to_string(),
            ModelConfig {
                provider: DEFAULT_PROVIDER.to_string(),
                model: "llama3.2:1b".to_string(),
                temperature: 0.2,
            },
        );

        let warnings = config.validate_with_warnings().unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(
            warnings
                .iter()
                .any(|w| w.kind == ConfigWarningKind::UnusedProvider && w.message.contains("spare"))
        );
        assert!(
            warnings
                .iter()
                .any(|w| w.kind == ConfigWarningKind::UnusedModel && w.message.contains("fast"))
        );
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = ClaimflowConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed = ClaimflowConfig::from_toml(&rendered).unwrap();

        assert_eq!(parsed.models, config.models);
        assert_eq!(parsed.providers, config.providers);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = ClaimflowConfig::load_or_default("/nonexistent/claimflow.toml").unwrap();
        assert!(config.get_model(REASONING_PROFILE).is_some());
    }
}
