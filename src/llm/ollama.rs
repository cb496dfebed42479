use crate::llm::client::{LLMClient, ModelParams};
use crate::llm::json;
use crate::types::{AppError, RawModelOutput, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::{
        chat::{ChatMessage, request::ChatMessageRequest},
        parameters::FormatType,
    },
    models::ModelOptions,
};
use tracing::debug;

const DEFAULT_PORT: u16 = 11434;

pub struct OllamaClient {
    client: Ollama,
    model: String,
    params: ModelParams,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String, params: ModelParams) -> Result<Self> {
        let (host, port) = split_base_url(base_url)?;
        let client = Ollama::new(host, port);

        Ok(Self {
            client,
            model,
            params,
        })
    }

    fn request(&self, system: &str, prompt: &str) -> ChatMessageRequest {
        let messages = vec![
            ChatMessage::system(system.to_string()),
            ChatMessage::user(prompt.to_string()),
        ];

        let mut request = ChatMessageRequest::new(self.model.clone(), messages);
        if let Some(temperature) = self.params.temperature {
            request = request.options(ModelOptions::default().temperature(temperature));
        }
        request
    }

    async fn send(&self, request: ChatMessageRequest) -> Result<String> {
        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::LLM(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }
}

/// Split `scheme://host[:port][/path]` into the `scheme://host` part and a port.
fn split_base_url(base_url: &str) -> Result<(String, u16)> {
    let (scheme, rest) = base_url.split_once("://").unwrap_or(("http", base_url));
    let authority = rest.split('/').next().unwrap_or_default();

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse::<u16>().map_err(|_| {
                AppError::Configuration(format!("Invalid port in Ollama URL '{}'", base_url))
            })?;
            (host, port)
        }
        None => (authority, DEFAULT_PORT),
    };

    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(AppError::Configuration(format!(
            "Invalid host in Ollama URL '{}'",
            base_url
        )));
    }

    Ok((format!("{}://{}", scheme, host), port))
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.send(self.request(system, prompt)).await
    }

    async fn generate_json(&self, system: &str, prompt: &str) -> Result<RawModelOutput> {
        let request = self.request(system, prompt).format(FormatType::Json);
        let reply = self.send(request).await?;
        debug!(model = %self.model, bytes = reply.len(), "Received JSON-mode reply");

        json::parse_object(&reply)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
