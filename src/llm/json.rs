//! Extraction of the JSON object from a JSON-mode model reply.
//!
//! Even with JSON mode requested, local models wrap the object in Markdown
//! fences or precede it with a `<think>` block. Those wrappers are removed
//! before parsing. Anything that still is not a JSON object is a collaborator
//! failure, not something the research validator should see.

use crate::types::{AppError, RawModelOutput, Result};
use serde_json::Value;

/// Parse a model reply into a field mapping.
pub fn parse_object(reply: &str) -> Result<RawModelOutput> {
    let body = strip_fences(strip_reasoning(reply));

    let value = serde_json::from_str::<Value>(body).or_else(|first_err| {
        outermost_object(body)
            .and_then(|span| serde_json::from_str::<Value>(span).ok())
            .ok_or_else(|| AppError::LLM(format!("Model reply is not valid JSON: {}", first_err)))
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::LLM(format!(
            "Model reply is JSON but not an object: {}",
            kind(&other)
        ))),
    }
}

/// Drop a leading `<think>...</think>` block emitted by reasoning models.
fn strip_reasoning(reply: &str) -> &str {
    let trimmed = reply.trim_start();
    if !trimmed.starts_with("<think>") {
        return trimmed;
    }
    match trimmed.find("</think>") {
        Some(end) => &trimmed[end + "</think>".len()..],
        None => trimmed,
    }
}

/// Remove a surrounding Markdown code fence, with or without a language tag.
fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Skip the info string ("json") on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
