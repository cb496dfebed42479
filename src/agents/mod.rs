pub mod research;
pub mod writer;

use serde_json::Value;

// Re-export commonly used types
pub use research::ResearchAgent;
pub use writer::WriterAgent;

/// Names of the built-in agents, as used in `[agents.<name>]`
pub const AGENT_NAMES: [&str; 2] = ["research", "writer"];

/// Render claims for a prompt.
///
/// Claims are opaque here; they are shown to the model as a pretty-printed JSON
/// array so statement/source pairs and any extra fields survive untouched.
pub fn render_claims(claims: &[Value]) -> String {
    serde_json::to_string_pretty(claims).unwrap_or_else(|_| format!("{:?}", claims))
}

/// System prompt of a built-in agent by name
pub fn system_prompt(agent_name: &str) -> Option<String> {
    match agent_name {
        "research" => Some(ResearchAgent::system_prompt()),
        "writer" => Some(WriterAgent::system_prompt()),
        _ => None,
    }
}
