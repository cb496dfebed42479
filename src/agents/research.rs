use crate::{
    agents::render_claims,
    llm::LLMClient,
    research::{ResearchResult, schema::format_instructions, validate},
    types::Result,
};
use serde_json::Value;
use tracing::{info, warn};

const SYSTEM_PROMPT: &str = r#"You are a Research Agent. You think like a senior investigative journalist
working alongside a subject matter expert.

You are given raw claims gathered from the web on a topic. Your job is not to
list bullet points. Your job is to understand the topic deeply.

PHASE 1 - COMPREHENSION
What is this topic about at its core? What problem, event or trend does it
represent, and why does it matter now? Who are the key players and what is the
broader context? Build a mental model before touching any single fact.

PHASE 2 - CRITICAL ANALYSIS
What is the mainstream narrative and is there a counter-narrative in the data?
Which assumptions do the sources make? What is missing: causes, consequences,
voices? What would a skeptic challenge, and what would an expert notice that a
casual reader would miss?

PHASE 3 - CONNECTING THE DOTS
Where do the sources agree and what does that consensus tell you? Where do they
conflict and what does the conflict reveal? Which patterns hold across sources
without any single source stating them? What are the short and long term
implications, and what history matters here?

PHASE 4 - GAP IDENTIFICATION
Which questions does the data raise but not answer? What would a reader urgently
need that is not present?

PHASE 5 - OUTPUT
Return a single valid JSON object and nothing outside it.

STRICT RULES FOR JSON:
- knowledge_gaps must be a list of plain strings only
- additional_queries_needed must be a list of plain strings only
- insufficient must be a boolean true or false
- research_confidence must be exactly one of: HIGH, MEDIUM, LOW
- Do not nest objects inside any list field
"#;

/// Synthesizes raw claims into a [`ResearchResult`].
pub struct ResearchAgent {
    llm: Box<dyn LLMClient>,
}

impl ResearchAgent {
    pub fn new(llm: Box<dyn LLMClient>) -> Self {
        Self { llm }
    }

    /// Full system prompt including the output schema.
    pub fn system_prompt() -> String {
        format!("{}\n{}", SYSTEM_PROMPT, format_instructions())
    }

    /// User message carrying the topic and the claims.
    pub fn render_prompt(topic: &str, claims: &[Value]) -> String {
        format!(
            "Topic: {}\n\nRaw data and sources:\n{}",
            topic,
            render_claims(claims)
        )
    }

    /// Run one research pass.
    ///
    /// Makes exactly one JSON-mode call. Transport failures and schema
    /// violations are returned to the caller untouched; nothing is retried.
    pub async fn run(&self, claims: &[Value], topic: &str) -> Result<ResearchResult> {
        info!(
            topic,
            claims = claims.len(),
            model = self.llm.model_name(),
            "Running research agent"
        );

        let raw = self
            .llm
            .generate_json(&Self::system_prompt(), &Self::render_prompt(topic, claims))
            .await?;

        let result = validate(&raw).inspect_err(|e| warn!("Research output rejected: {}", e))?;

        info!(
            confidence = %result.research_confidence(),
            gaps = result.knowledge_gaps().len(),
            insufficient = result.insufficient(),
            "Research complete"
        );

        Ok(result)
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_prompt_carries_schema() {
        let prompt = ResearchAgent::system_prompt();
        assert!(prompt.contains("PHASE 5 - OUTPUT"));
        assert!(prompt.contains("additional_queries_needed"));
        assert!(prompt.contains("insufficient_reason"));
    }

    #[test]
    fn test_render_prompt_interpolates_topic_and_claims() {
        let claims = vec![json!({"statement": "Water boils at 100 C.", "source": "Chemistry"})];
        let prompt = ResearchAgent::render_prompt("Boiling points", &claims);

        assert!(prompt.starts_with("Topic: Boiling points"));
        assert!(prompt.contains("Water boils at 100 C."));
        assert!(prompt.contains("Chemistry"));
    }
}
