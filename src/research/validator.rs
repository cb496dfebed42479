//! Builds a [`ResearchResult`] out of raw model output.

use super::coercion::{to_boolean, to_optional_text, to_text, to_text_sequence};
use super::schema::{
    ADDITIONAL_QUERIES_NEEDED, CONFLICTING_PERSPECTIVES, CORE_UNDERSTANDING, FieldSpec,
    IMPORTANT_NUANCES, INSUFFICIENT, INSUFFICIENT_REASON, KEY_DYNAMICS, KNOWLEDGE_GAPS,
    RESEARCH_CONFIDENCE, ResearchConfidence, ResearchResult,
};
use crate::types::{AppError, RawModelOutput, Result};
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Coerces every declared field of `raw` and constructs the record.
///
/// Absent fields take their declared default. Keys the schema does not declare
/// are ignored.
///
/// # Errors
///
/// Returns [`AppError::SchemaViolation`] when `research_confidence`, coerced to
/// text, is not exactly `HIGH`, `MEDIUM` or `LOW`. No other field can fail.
pub fn validate(raw: &RawModelOutput) -> Result<ResearchResult> {
    let confidence_text = to_text(&field(raw, &RESEARCH_CONFIDENCE));
    let research_confidence = confidence_text
        .parse::<ResearchConfidence>()
        .map_err(|_| {
            warn!(
                field = RESEARCH_CONFIDENCE.name,
                value = %confidence_text,
                "Model returned an unknown confidence level"
            );
            AppError::SchemaViolation {
                field: RESEARCH_CONFIDENCE.name.to_string(),
                value: confidence_text.clone(),
            }
        })?;

    Ok(ResearchResult {
        core_understanding: to_text(&field(raw, &CORE_UNDERSTANDING)),
        key_dynamics: to_text(&field(raw, &KEY_DYNAMICS)),
        important_nuances: to_text(&field(raw, &IMPORTANT_NUANCES)),
        conflicting_perspectives: to_text(&field(raw, &CONFLICTING_PERSPECTIVES)),
        knowledge_gaps: to_text_sequence(&field(raw, &KNOWLEDGE_GAPS)),
        research_confidence,
        additional_queries_needed: to_text_sequence(&field(raw, &ADDITIONAL_QUERIES_NEEDED)),
        insufficient: to_boolean(&field(raw, &INSUFFICIENT)),
        insufficient_reason: to_optional_text(&field(raw, &INSUFFICIENT_REASON)),
    })
}

fn field<'a>(raw: &'a RawModelOutput, spec: &FieldSpec) -> Cow<'a, Value> {
    match raw.get(spec.name) {
        Some(value) => {
            if !spec.shape.matches(value) {
                debug!(field = spec.name, raw = %value, "Repairing field shape");
            }
            Cow::Borrowed(value)
        }
        None => {
            debug!(field = spec.name, "Field absent, using default");
            Cow::Owned(spec.shape.default_value())
        }
    }
}
