//! Content generator
//!
//! Primary provider first, secondary provider once on any primary failure,
//! then a fixed degraded text. Generation never fails from the caller's view.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::llm::{CompletionRequest, LlmBackend, LlmError};

/// Default system message for generation
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are an expert climate educator.";

/// Returned when every provider failed or none is configured
pub const DEGRADED_MESSAGE: &str =
    "AI service is currently unavailable. Please ensure Groq API key is properly configured.";

/// Substituted for an empty secondary reply
pub const EMPTY_REPLY_MESSAGE: &str = "Sorry, I couldn't generate a response.";

pub const DEFAULT_JSON_MODEL: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.1-8b-instant";

const JSON_PREFIX: &str = "Generate a JSON response: ";

/// Shape of the reply the caller intends to consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Text,
    Json,
}

/// Primary provider settings for one content format
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationProfile {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationProfile {
    pub fn json(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.7,
            max_tokens: 800,
        }
    }

    pub fn text(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.8,
            max_tokens: 500,
        }
    }
}

/// Which step of the cascade produced the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Primary,
    Secondary,
    Degraded,
}

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

pub struct ContentGenerator {
    primary: Option<Arc<dyn LlmBackend>>,
    secondary: Option<Arc<dyn LlmBackend>>,
    json_profile: GenerationProfile,
    text_profile: GenerationProfile,
}

impl ContentGenerator {
    /// A missing backend counts as a failure of that step.
    pub fn new(
        primary: Option<Arc<dyn LlmBackend>>,
        secondary: Option<Arc<dyn LlmBackend>>,
    ) -> Self {
        Self {
            primary,
            secondary,
            json_profile: GenerationProfile::json(DEFAULT_JSON_MODEL),
            text_profile: GenerationProfile::text(DEFAULT_TEXT_MODEL),
        }
    }

    /// Override the primary provider models.
    pub fn with_models(mut self, json_model: impl Into<String>, text_model: impl Into<String>) -> Self {
        self.json_profile.model = json_model.into();
        self.text_profile.model = text_model.into();
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    pub fn profile(&self, format: ContentFormat) -> &GenerationProfile {
        match format {
            ContentFormat::Json => &self.json_profile,
            ContentFormat::Text => &self.text_profile,
        }
    }

    /// Generate text for a prompt.
    pub async fn generate(&self, prompt: &str, system_message: &str, format: ContentFormat) -> String {
        self.generate_with_outcome(prompt, system_message, format).await.0
    }

    /// Generate text and report which step of the cascade produced it.
    pub async fn generate_with_outcome(
        &self,
        prompt: &str,
        system_message: &str,
        format: ContentFormat,
    ) -> (String, GenerationOutcome) {
        info!(
            prompt_len = prompt.len(),
            ?format,
            "AI content generation started"
        );

        match self.try_primary(prompt, system_message, format).await {
            Ok(content) => {
                info!(len = content.len(), "Primary provider response received");
                return (content, GenerationOutcome::Primary);
            }
            Err(e) => error!("Primary provider generation error: {}", e),
        }

        match self.try_secondary(prompt, system_message).await {
            Ok(content) => {
                info!(len = content.len(), "Secondary provider response received");
                (content, GenerationOutcome::Secondary)
            }
            Err(e) => {
                error!("Secondary provider also failed: {}", e);
                warn!("All AI providers failed, returning degraded text");
                (DEGRADED_MESSAGE.to_string(), GenerationOutcome::Degraded)
            }
        }
    }

    fn primary_request(&self, prompt: &str, system_message: &str, format: ContentFormat) -> CompletionRequest {
        let profile = self.profile(format);
        let request = match format {
            ContentFormat::Json => CompletionRequest::user(format!("{}{}", JSON_PREFIX, prompt)).with_json_output(),
            ContentFormat::Text => CompletionRequest::user(prompt),
        };
        request
            .with_system(system_message)
            .with_model(profile.model.clone())
            .with_temperature(profile.temperature)
            .with_max_tokens(profile.max_tokens)
    }

    async fn try_primary(
        &self,
        prompt: &str,
        system_message: &str,
        format: ContentFormat,
    ) -> Result<String, LlmError> {
        let backend = self
            .primary
            .as_ref()
            .ok_or_else(|| LlmError::Unavailable("primary provider not configured".to_string()))?;
        debug!(backend = backend.id(), "Calling primary provider");

        let response = backend
            .complete(self.primary_request(prompt, system_message, format))
            .await?;
        Ok(response.content)
    }

    async fn try_secondary(&self, prompt: &str, system_message: &str) -> Result<String, LlmError> {
        let backend = self
            .secondary
            .as_ref()
            .ok_or_else(|| LlmError::Unavailable("secondary provider not configured".to_string()))?;
        info!(backend = backend.id(), "Attempting secondary provider");

        let combined = format!("{}\n\nUser Query: {}", system_message, prompt);
        let response = backend.complete(CompletionRequest::user(combined)).await?;

        if response.content.trim().is_empty() {
            Ok(EMPTY_REPLY_MESSAGE.to_string())
        } else {
            Ok(response.content)
        }
    }
}

impl fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("primary", &self.primary.as_ref().map(|b| b.id().to_string()))
            .field("secondary", &self.secondary.as_ref().map(|b| b.id().to_string()))
            .field("json_profile", &self.json_profile)
            .field("text_profile", &self.text_profile)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockBackend, ResponseFormat};

    fn generator(primary: &Arc<MockBackend>, secondary: &Arc<MockBackend>) -> ContentGenerator {
        ContentGenerator::new(
            Some(primary.clone() as Arc<dyn LlmBackend>),
            Some(secondary.clone() as Arc<dyn LlmBackend>),
        )
    }

    #[tokio::test]
    async fn test_primary_success_text_unmodified() {
        let primary = Arc::new(MockBackend::new("groq").with_response("  Plant trees!\n"));
        let secondary = Arc::new(MockBackend::new("gemini"));
        let gen = generator(&primary, &secondary);

        let (text, outcome) = gen
            .generate_with_outcome("What if?", DEFAULT_SYSTEM_MESSAGE, ContentFormat::Text)
            .await;

        assert_eq!(text, "  Plant trees!\n");
        assert_eq!(outcome, GenerationOutcome::Primary);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_text_profile_request() {
        let primary = Arc::new(MockBackend::new("groq"));
        let secondary = Arc::new(MockBackend::new("gemini"));
        let gen = generator(&primary, &secondary);

        gen.generate("hello", "sys", ContentFormat::Text).await;

        let request = primary.last_request().unwrap();
        assert_eq!(request.model.as_deref(), Some(DEFAULT_TEXT_MODEL));
        assert_eq!(request.max_tokens, Some(500));
        assert_eq!(request.temperature, Some(0.8));
        assert_eq!(request.system_prompt.as_deref(), Some("sys"));
        assert_eq!(request.messages[0].content, "hello");
        assert!(request.response_format.is_none());
    }

    #[tokio::test]
    async fn test_json_profile_request() {
        let primary = Arc::new(MockBackend::new("groq").with_response("{}"));
        let secondary = Arc::new(MockBackend::new("gemini"));
        let gen = generator(&primary, &secondary);

        gen.generate("plan", "sys", ContentFormat::Json).await;

        let request = primary.last_request().unwrap();
        assert_eq!(request.model.as_deref(), Some(DEFAULT_JSON_MODEL));
        assert_eq!(request.max_tokens, Some(800));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert_eq!(request.messages[0].content, "Generate a JSON response: plan");
    }

    #[tokio::test]
    async fn test_secondary_used_once_on_primary_failure() {
        let primary = Arc::new(MockBackend::failing("groq"));
        let secondary = Arc::new(MockBackend::new("gemini").with_response("From Gemini"));
        let gen = generator(&primary, &secondary);

        let (text, outcome) = gen
            .generate_with_outcome("Q", "System", ContentFormat::Json)
            .await;

        assert_eq!(text, "From Gemini");
        assert_eq!(outcome, GenerationOutcome::Secondary);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);

        let request = secondary.last_request().unwrap();
        assert_eq!(request.messages[0].content, "System\n\nUser Query: Q");
        assert!(request.system_prompt.is_none());
    }

    #[tokio::test]
    async fn test_empty_secondary_reply() {
        let primary = Arc::new(MockBackend::failing("groq"));
        let secondary = Arc::new(MockBackend::new("gemini").with_response("   "));
        let gen = generator(&primary, &secondary);

        let text = gen.generate("Q", "S", ContentFormat::Text).await;
        assert_eq!(text, EMPTY_REPLY_MESSAGE);
    }

    #[tokio::test]
    async fn test_degraded_when_both_fail() {
        let primary = Arc::new(MockBackend::failing("groq"));
        let secondary = Arc::new(MockBackend::failing("gemini"));
        let gen = generator(&primary, &secondary);

        let (text, outcome) = gen.generate_with_outcome("Q", "S", ContentFormat::Text).await;
        assert_eq!(text, DEGRADED_MESSAGE);
        assert_eq!(outcome, GenerationOutcome::Degraded);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_primary_without_secondary_degrades() {
        let primary = Arc::new(MockBackend::failing("groq"));
        let gen = ContentGenerator::new(Some(primary.clone() as Arc<dyn LlmBackend>), None);

        let (text, outcome) = gen.generate_with_outcome("Q", "S", ContentFormat::Text).await;
        assert_eq!(text, DEGRADED_MESSAGE);
        assert_eq!(outcome, GenerationOutcome::Degraded);
        assert_eq!(primary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_primary_goes_to_secondary() {
        let secondary = Arc::new(MockBackend::new("gemini").with_response("ok"));
        let gen = ContentGenerator::new(None, Some(secondary.clone() as Arc<dyn LlmBackend>));

        let (text, outcome) = gen.generate_with_outcome("Q", "S", ContentFormat::Text).await;
        assert_eq!(text, "ok");
        assert_eq!(outcome, GenerationOutcome::Secondary);
    }

    #[tokio::test]
    async fn test_nothing_configured_degrades() {
        let gen = ContentGenerator::new(None, None);
        assert!(!gen.has_primary());
        assert!(!gen.has_secondary());
        assert_eq!(gen.generate("Q", "S", ContentFormat::Json).await, DEGRADED_MESSAGE);
    }

    #[tokio::test]
    async fn test_model_overrides() {
        let primary = Arc::new(MockBackend::new("groq"));
        let gen = ContentGenerator::new(Some(primary.clone() as Arc<dyn LlmBackend>), None)
            .with_models("big-model", "small-model");

        gen.generate("x", "s", ContentFormat::Json).await;
        assert_eq!(primary.last_request().unwrap().model.as_deref(), Some("big-model"));
        gen.generate("x", "s", ContentFormat::Text).await;
        assert_eq!(primary.last_request().unwrap().model.as_deref(), Some("small-model"));
    }
}
