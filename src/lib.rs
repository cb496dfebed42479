//! # claimflow
//!
//! A two-agent LLM content pipeline: a research agent that synthesizes raw
//! claims into a validated, structured understanding of a topic, and a writer
//! agent that formats claims into a social-media post without adding facts.
//!
//! ## Overview
//!
//! claimflow can be used in two ways:
//!
//! 1. **As a CLI** - Run the `claimflow` binary
//! 2. **As a library** - Import the agents into your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use claimflow::{ClaimflowConfig, ProviderRegistry, ResearchAgent};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClaimflowConfig::load_or_default("claimflow.toml")?;
//!     let registry = ProviderRegistry::from_config(&config);
//!
//!     let llm = registry.create_client_for_model("reasoning").await?;
//!     let agent = ResearchAgent::new(llm);
//!
//!     let claims = vec![json!({"statement": "Water boils at 100 C.", "source": "Chemistry 101"})];
//!     let result = agent.run(&claims, "Boiling points").await?;
//!     println!("{}", result.core_understanding());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |
//!
//! ## Modules
//!
//! - [`agents`] - Research and writer agents
//! - [`research`] - Result schema, value coercion and validation
//! - [`llm`] - LLM client boundary and providers
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Research and writer agents.
pub mod agents;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Research result schema, coercion and validation.
pub mod research;
/// Core types and errors.
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{ResearchAgent, WriterAgent};
pub use llm::{LLMClient, ModelParams, Provider, ProviderRegistry};
pub use research::{ResearchConfidence, ResearchResult, validate};
pub use types::{AppError, RawModelOutput, Result};
pub use utils::toml_config::ClaimflowConfig;
