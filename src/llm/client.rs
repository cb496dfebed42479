//! LLM Client abstractions and provider management
//!
//! Agents talk to a language model only through [`LLMClient`]. Two request
//! kinds exist:
//! - **Plain text**: a system and a user message, the reply returned as-is
//! - **JSON mode**: the provider is asked for a JSON object and the reply is
//!   parsed into an untyped [`RawModelOutput`]
//!
//! Transport and parse failures surface as [`crate::types::AppError::LLM`].

use crate::types::{RawModelOutput, Result};
use crate::utils::toml_config::{ModelConfig, ProviderConfig};
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
///
/// Every call is a single request/response exchange. Implementations do not
/// retry.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate plain text with a system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate in JSON mode and return the reply as a field mapping
    async fn generate_json(&self, system: &str, prompt: &str) -> Result<RawModelOutput>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelParams {
    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// Ollama local LLM provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "deepseek-r1:8b".to_string(),
    ///     params: ModelParams { temperature: Some(0.0) },
    /// };
    /// ```
    Ollama {
        base_url: String,
        model: String,
        params: ModelParams,
    },
}

impl Provider {
    /// Build a provider from a model profile and the provider it references
    pub fn from_model_config(model: &ModelConfig, provider: &ProviderConfig) -> Self {
        match provider {
            ProviderConfig::Ollama { base_url } => Provider::Ollama {
                base_url: base_url.clone(),
                model: model.model.clone(),
                params: ModelParams {
                    temperature: Some(model.temperature),
                },
            },
        }
    }

    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's cargo feature is disabled or the
    /// configuration is invalid.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama {
                base_url,
                model,
                params,
            } => Ok(Box::new(super::ollama::OllamaClient::new(
                base_url,
                model.clone(),
                params.clone(),
            )?)),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { .. } => Err(crate::types::AppError::Configuration(
                "Ollama support not compiled in; rebuild with the 'ollama' feature".to_string(),
            )),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// Model identifier this provider will be asked to run
    pub fn model(&self) -> &str {
        match self {
            Provider::Ollama { model, .. } => model,
        }
    }
}
