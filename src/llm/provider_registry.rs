//! Provider Registry for named model profiles
//!
//! Agents never pick a model themselves; the caller resolves a profile name
//! (`reasoning`, `writing`, ...) through this registry, which follows the
//! profile to its provider and builds the client.

use crate::llm::client::{LLMClient, Provider};
use crate::types::{AppError, Result};
use crate::utils::toml_config::{ClaimflowConfig, ModelConfig, ProviderConfig};
use std::collections::BTreeMap;
use tracing::debug;

/// Registry for managing named LLM providers and model profiles
pub struct ProviderRegistry {
    /// Provider configurations keyed by name
    providers: BTreeMap<String, ProviderConfig>,
    /// Model profiles keyed by name
    models: BTreeMap<String, ModelConfig>,
}

impl ProviderRegistry {
    /// Create a provider registry from TOML configuration
    pub fn from_config(config: &ClaimflowConfig) -> Self {
        Self {
            providers: config.providers.clone(),
            models: config.models.clone(),
        }
    }

    /// Get a model profile by name
    pub fn get_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }

    /// Get all model profile names
    pub fn model_names(&self) -> Vec<&str> {
        self.models.keys().map(|s| s.as_str()).collect()
    }

    /// Resolve a model profile to a concrete provider
    pub fn provider_for_model(&self, model_name: &str) -> Result<Provider> {
        let model_config = self.get_model(model_name).ok_or_else(|| {
            AppError::Configuration(format!("Model '{}' not found in configuration", model_name))
        })?;

        let provider_config = self.providers.get(&model_config.provider).ok_or_else(|| {
            AppError::Configuration(format!(
                "Provider '{}' referenced by model '{}' not found",
                model_config.provider, model_name
            ))
        })?;

        Ok(Provider::from_model_config(model_config, provider_config))
    }

    /// Create an LLM client for a model profile by name
    pub async fn create_client_for_model(&self, model_name: &str) -> Result<Box<dyn LLMClient>> {
        let provider = self.provider_for_model(model_name)?;
        debug!(
            profile = model_name,
            provider = provider.name(),
            model = provider.model(),
            "Creating LLM client"
        );
        provider.create_client().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::ModelParams;
    use crate::utils::toml_config::REASONING_PROFILE;

    #[test]
    fn test_resolves_default_reasoning_profile() {
        let registry = ProviderRegistry::from_config(&ClaimflowConfig::default());
        let provider = registry.provider_for_model(REASONING_PROFILE).unwrap();

        match provider {
            Provider::Ollama {
                base_url,
                model,
                params,
            } => {
                assert_eq!(base_url, "http://localhost:11434");
                assert_eq!(model, "deepseek-r1:8b");
                assert_eq!(
                    params,
                    ModelParams {
                        temperature: Some(0.0)
                    }
                );
            }
        }
    }

    #[test]
    fn test_unknown_profile_is_configuration_error() {
        let registry = ProviderRegistry::from_config(&ClaimflowConfig::default());
        let err = registry.provider_for_model("creative").unwrap_err();

        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("creative"));
    }

    #[test]
    fn test_model_names_are_sorted() {
        let registry = ProviderRegistry::from_config(&ClaimflowConfig::default());
        assert_eq!(registry.model_names(), vec!["reasoning", "writing"]);
    }
}
