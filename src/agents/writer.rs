use crate::{agents::render_claims, llm::LLMClient, types::Result};
use serde_json::Value;
use tracing::info;

const SYSTEM_PROMPT: &str = r#"You are a social media content writer.
Your only job is to turn the given claims into a social media post.

STRICT RULES:
- Use only the claims provided.
- Do not add any new facts.
- Do not assume or infer missing information.
- Do not use any external knowledge or databases.
- Do not use any information that is not explicitly stated in the claims.
- Do not use the em dash character.

You are a language formatter, not a researcher. Format the provided claims into a
post for the requested platform, tone and format without adding information or
making assumptions."#;

/// Formats claims into a social-media post.
pub struct WriterAgent {
    llm: Box<dyn LLMClient>,
}

impl WriterAgent {
    pub fn new(llm: Box<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub fn system_prompt() -> String {
        SYSTEM_PROMPT.to_string()
    }

    pub fn render_prompt(claims: &[Value], platform: &str, tone: &str, format: &str) -> String {
        format!(
            "Platform: {}\nTone: {}\nFormat: {}\n\nClaims to write from:\n{}\n\nWrite the content now.",
            platform,
            tone,
            format,
            render_claims(claims)
        )
    }

    /// Write one post. The model's reply is returned verbatim.
    pub async fn run(
        &self,
        claims: &[Value],
        platform: &str,
        tone: &str,
        format: &str,
    ) -> Result<String> {
        info!(
            platform,
            tone,
            format,
            claims = claims.len(),
            model = self.llm.model_name(),
            "Running writer agent"
        );

        let post = self
            .llm
            .generate_with_system(
                &Self::system_prompt(),
                &Self::render_prompt(claims, platform, tone, format),
            )
            .await?;

        info!(chars = post.chars().count(), "Post written");
        Ok(post)
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
    fn test_render_prompt_fields() {
        let claims = vec![json!({"statement": "The Earth revolves around the Sun."})];
        let prompt = WriterAgent::render_prompt(&claims, "Medium", "Informative", "Text");

        assert!(prompt.starts_with("Platform: Medium\nTone: Informative\nFormat: Text"));
        assert!(prompt.contains("The Earth revolves around the Sun."));
        assert!(prompt.ends_with("Write the content now."));
    }

    #[test]
    fn test_system_prompt_forbids_new_facts() {
        let prompt = WriterAgent::system_prompt();
        assert!(prompt.contains("Do not add any new facts."));
        assert!(prompt.contains("em dash"));
    }
}
