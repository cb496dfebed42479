use serde_json::{Map, Value};

// ============= Collaborator Payload Types =============

/// Untyped field mapping returned by a JSON-mode model call.
///
/// Nothing about its shape is trusted; the research validator coerces each
/// declared field out of it and ignores everything else.
pub type RawModelOutput = Map<String, Value>;

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The model collaborator could not be reached or its reply could not be parsed.
    #[error("LLM error: {0}")]
    LLM(String),

    /// A closed-set field still held an unacceptable value after coercion.
    #[error("Schema violation: field '{field}' has invalid value {value:?}")]
    SchemaViolation { field: String, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Name of the offending field when this is a schema violation.
    pub fn violated_field(&self) -> Option<&str> {
        match self {
            AppError::SchemaViolation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
