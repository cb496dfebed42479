//! LLM Provider Clients and Abstractions
//!
//! This module is the boundary to the language-model collaborator. The rest of
//! the crate only sees the [`LLMClient`] trait.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`Provider`] - A concrete provider plus model and sampling parameters
//! - [`ProviderRegistry`] - Resolves named model profiles from `claimflow.toml`
//! - [`json`] - Pulls the JSON object out of a JSON-mode reply
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `ollama` - Local Ollama server (default)
//!
//! # Example
//!
//! ```ignore
//! use claimflow::llm::ProviderRegistry;
//!
//! let registry = ProviderRegistry::from_config(&config);
//! let client = registry.create_client_for_model("reasoning").await?;
//!
//! let fields = client.generate_json(system, "Topic: tides").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// JSON object extraction from model replies.
pub mod json;
/// Registry resolving model profiles to clients.
pub mod provider_registry;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use client::{LLMClient, ModelParams, Provider};
pub use provider_registry::ProviderRegistry;
