//! Declared shape of a research result.
//!
//! [`RESEARCH_FIELDS`] is the contract between the model prompt and the
//! validator: every entry names a JSON key the model is asked to produce and the
//! primitive shape that key is coerced into.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Target primitive shape of a research field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A single string.
    ScalarText,
    /// An ordered list of strings.
    TextSequence,
    /// One of `HIGH`, `MEDIUM`, `LOW`, matched exactly.
    Confidence,
    /// A boolean.
    Boolean,
    /// A string, or nothing when the coerced string is empty.
    OptionalText,
}

impl FieldShape {
    /// Raw value used when the model omitted the field entirely.
    pub fn default_value(self) -> Value {
        match self {
            FieldShape::ScalarText | FieldShape::Confidence | FieldShape::OptionalText => {
                Value::String(String::new())
            }
            FieldShape::TextSequence => Value::Array(Vec::new()),
            FieldShape::Boolean => Value::Bool(false),
        }
    }

    /// Whether a raw value already has this shape and needs no repair.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldShape::ScalarText | FieldShape::Confidence => value.is_string(),
            FieldShape::TextSequence => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldShape::Boolean => value.is_boolean(),
            FieldShape::OptionalText => value.is_string() || value.is_null(),
        }
    }
}

/// One declared field of [`ResearchResult`].
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
    pub description: &'static str,
}

pub const CORE_UNDERSTANDING: FieldSpec = FieldSpec {
    name: "core_understanding",
    shape: FieldShape::ScalarText,
    description: "What this topic is really about, written clearly for an intelligent reader",
};

pub const KEY_DYNAMICS: FieldSpec = FieldSpec {
    name: "key_dynamics",
    shape: FieldShape::ScalarText,
    description: "Forces, relationships, causes and consequences at play",
};

pub const IMPORTANT_NUANCES: FieldSpec = FieldSpec {
    name: "important_nuances",
    shape: FieldShape::ScalarText,
    description: "Common misunderstandings, edge cases, exceptions and contradictions",
};

pub const CONFLICTING_PERSPECTIVES: FieldSpec = FieldSpec {
    name: "conflicting_perspectives",
    shape: FieldShape::ScalarText,
    description: "Where sources disagree and what each side argues",
};

pub const KNOWLEDGE_GAPS: FieldSpec = FieldSpec {
    name: "knowledge_gaps",
    shape: FieldShape::TextSequence,
    description: "Plain strings describing what could not be determined",
};

pub const RESEARCH_CONFIDENCE: FieldSpec = FieldSpec {
    name: "research_confidence",
    shape: FieldShape::Confidence,
    description: "Confidence level: exactly HIGH, MEDIUM or LOW",
};

pub const ADDITIONAL_QUERIES_NEEDED: FieldSpec = FieldSpec {
    name: "additional_queries_needed",
    shape: FieldShape::TextSequence,
    description: "Plain search query strings that would fill the gaps; empty when confidence is HIGH",
};

pub const INSUFFICIENT: FieldSpec = FieldSpec {
    name: "insufficient",
    shape: FieldShape::Boolean,
    description: "true if the data was too poor to form any understanding, else false",
};

pub const INSUFFICIENT_REASON: FieldSpec = FieldSpec {
    name: "insufficient_reason",
    shape: FieldShape::OptionalText,
    description: "Reason when insufficient is true, else null",
};

/// All research fields, in output order.
pub const RESEARCH_FIELDS: [FieldSpec; 9] = [
    CORE_UNDERSTANDING,
    KEY_DYNAMICS,
    IMPORTANT_NUANCES,
    CONFLICTING_PERSPECTIVES,
    KNOWLEDGE_GAPS,
    RESEARCH_CONFIDENCE,
    ADDITIONAL_QUERIES_NEEDED,
    INSUFFICIENT,
    INSUFFICIENT_REASON,
];

/// How confident the model is in its own synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResearchConfidence {
    High,
    Medium,
    Low,
}

impl ResearchConfidence {
    pub fn as_str(self) -> &'static str {
        match self {
            ResearchConfidence::High => "HIGH",
            ResearchConfidence::Medium => "MEDIUM",
            ResearchConfidence::Low => "LOW",
        }
    }
}

impl fmt::Display for ResearchConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match. `"high"` and `" HIGH"` are rejected.
impl FromStr for ResearchConfidence {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(ResearchConfidence::High),
            "MEDIUM" => Ok(ResearchConfidence::Medium),
            "LOW" => Ok(ResearchConfidence::Low),
            _ => Err(()),
        }
    }
}

// Only the validator builds these, so every instance holds flat strings, string
// lists, a boolean and a known confidence level.
/// Validated output of the research agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResearchResult {
    /// What this topic is really about, written clearly for an intelligent reader
    pub(crate) core_understanding: String,
    /// Forces, relationships, causes and consequences at play
    pub(crate) key_dynamics: String,
    /// Common misunderstandings, edge cases, exceptions and contradictions
    pub(crate) important_nuances: String,
    /// Where sources disagree and what each side argues
    pub(crate) conflicting_perspectives: String,
    /// List of plain strings describing what could not be determined
    pub(crate) knowledge_gaps: Vec<String>,
    /// Confidence level: HIGH, MEDIUM or LOW
    pub(crate) research_confidence: ResearchConfidence,
    /// List of plain search query strings to fill gaps. Empty list if HIGH confidence
    pub(crate) additional_queries_needed: Vec<String>,
    /// True if data was too poor to form any understanding, else false
    pub(crate) insufficient: bool,
    /// Reason if insufficient is true, else null
    pub(crate) insufficient_reason: Option<String>,
}

impl ResearchResult {
    pub fn core_understanding(&self) -> &str {
        &self.core_understanding
    }

    pub fn key_dynamics(&self) -> &str {
        &self.key_dynamics
    }

    pub fn important_nuances(&self) -> &str {
        &self.important_nuances
    }

    pub fn conflicting_perspectives(&self) -> &str {
        &self.conflicting_perspectives
    }

    pub fn knowledge_gaps(&self) -> &[String] {
        &self.knowledge_gaps
    }

    pub fn research_confidence(&self) -> ResearchConfidence {
        self.research_confidence
    }

    pub fn additional_queries_needed(&self) -> &[String] {
        &self.additional_queries_needed
    }

    pub fn insufficient(&self) -> bool {
        self.insufficient
    }

    pub fn insufficient_reason(&self) -> Option<&str> {
        self.insufficient_reason.as_deref()
    }

    /// LOW and MEDIUM results should be sent back for another search round using
    /// [`additional_queries_needed`](Self::additional_queries_needed).
    pub fn needs_more_research(&self) -> bool {
        self.research_confidence != ResearchConfidence::High
    }
}

/// Output instructions appended to the research system prompt.
///
/// Embeds the JSON schema of [`ResearchResult`] so the model sees every field
/// name the validator keys off.
pub fn format_instructions() -> String {
    let schema = schemars::schema_for!(ResearchResult);
    let schema_json = serde_json::to_string_pretty(&schema).unwrap_or_default();

    format!(
        "The output must be a single JSON object that conforms to the JSON schema below. \
         Use exactly these property names and no others.\n\n\
         Here is the output schema:\n```\n{}\n```",
        schema_json
    )
}
