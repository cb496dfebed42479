//! Structured Research Output
//!
//! This module turns the free-form JSON a language model returns for a research
//! request into a strictly typed [`ResearchResult`].
//!
//! # Architecture
//!
//! - [`schema`] - Declared fields, their target shapes and the result record
//! - [`coercion`] - Total functions repairing strings, lists, objects and flags
//! - [`validator`] - Applies coercion per field and builds the record
//!
//! # Usage
//!
//! ```ignore
//! use claimflow::research::validate;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "knowledge_gaps": [{"gap": "X", "why": "Y"}],
//!     "research_confidence": "LOW",
//!     "insufficient": "true"
//! });
//!
//! let result = validate(raw.as_object().unwrap())?;
//! assert_eq!(result.knowledge_gaps(), ["X | Y"]);
//! assert!(result.insufficient());
//! ```
//!
//! # Failure Policy
//!
//! Coercion never fails. Validation fails in exactly one case: a
//! `research_confidence` that is not exactly `HIGH`, `MEDIUM` or `LOW` after
//! coercion. Downstream routing keys off that value, so it is never guessed.

/// Total value-to-shape conversions.
pub mod coercion;
/// Research field declarations and the validated record.
pub mod schema;
/// Raw output to record construction.
pub mod validator;

pub use schema::{ResearchConfidence, ResearchResult};
pub use validator::validate;
