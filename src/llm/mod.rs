//! LLM Backend abstraction layer.
//!
//! Provides a trait-based interface for the text-generation providers:
//! - Groq (OpenAI-compatible chat completions), the primary provider
//! - Gemini, the secondary provider
//! - Mock backend for testing

pub mod gemini;
pub mod groq;
pub mod mock;
pub mod traits;

pub use gemini::GeminiBackend;
pub use groq::GroqBackend;
pub use mock::MockBackend;
pub use traits::{
    CompletionRequest, CompletionResponse, LlmBackend, LlmError, Message, MessageRole,
    ResponseFormat,
};
