//! Groq LLM backend.
//!
//! Groq serves an OpenAI-compatible chat completions API, so this backend
//! also works against any other OpenAI-compatible endpoint (vLLM, Ollama).

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use super::traits::*;

/// Default Groq API base URL
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI-compatible chat completions backend.
pub struct GroqBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqBackend {
    /// Create a new backend for the given base URL and default model.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Create a backend for the hosted Groq API.
    pub fn groq(model: &str, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(GROQ_BASE_URL, model, api_key)
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatRequest>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormatRequest {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

fn build_chat_request(default_model: &str, request: CompletionRequest) -> ChatRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = request.system_prompt {
        messages.push(ChatMessage {
            role: MessageRole::System.as_str(),
            content: system,
        });
    }

    messages.extend(request.messages.into_iter().map(|msg| ChatMessage {
        role: msg.role.as_str(),
        content: msg.content,
    }));

    let response_format = request.response_format.map(|rf| ResponseFormatRequest {
        format_type: match rf {
            ResponseFormat::JsonObject => "json_object",
            ResponseFormat::Text => "text",
        },
    });

    ChatRequest {
        model: request.model.unwrap_or_else(|| default_model.to_string()),
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        response_format,
        stream: false,
    }
}

#[async_trait]
impl LlmBackend for GroqBackend {
    fn id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let chat_request = build_chat_request(&self.model, request);

        let response = self
            .client
            .post(self.chat_completions_url())
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();

            if status.as_u16() == 429 {
                let retry_after_secs = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                return Err(LlmError::RateLimited { retry_after_secs });
            }

            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!("HTTP {}: {}", status, body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ParseError("No choices in response".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| LlmError::ParseError("Empty message content".to_string()))?;

        Ok(CompletionResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_creation() {
        let backend = GroqBackend::groq("llama-3.1-8b-instant", "gsk_test").unwrap();
        assert_eq!(backend.id(), "llama-3.1-8b-instant");
        assert_eq!(
            backend.chat_completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = GroqBackend::new("http://localhost:11434/v1/", "llama3.2", "k").unwrap();
        assert_eq!(
            backend.chat_completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_json_mode() {
        let request = CompletionRequest::user("Plan a path")
            .with_system("You are an expert climate educator.")
            .with_model("llama-3.1-70b-versatile")
            .with_temperature(0.7)
            .with_max_tokens(800)
            .with_json_output();

        let body = serde_json::to_value(build_chat_request("default", request)).unwrap();

        assert_eq!(body["model"], "llama-3.1-70b-versatile");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Plan a path");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_request_body_defaults() {
        let body =
            serde_json::to_value(build_chat_request("llama-3.1-8b-instant", CompletionRequest::user("hi")))
                .unwrap();

        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert!(body.get("response_format").is_none());
        assert!(body.get("temperature").is_none());
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }
}
