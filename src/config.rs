//! Configuration for EcoQuest
//!
//! CLI arguments and environment variable handling using clap. A `.env` file
//! is loaded by `main` before parsing.

use clap::Parser;
use std::net::SocketAddr;

use crate::llm::gemini::GEMINI_BASE_URL;
use crate::llm::groq::GROQ_BASE_URL;
use crate::services::content::{DEFAULT_JSON_MODEL, DEFAULT_TEXT_MODEL};

/// Placeholder shipped in the sample `.env` for the primary provider
pub const GROQ_KEY_PLACEHOLDER: &str = "your_groq_api_key_here";

/// Placeholder shipped in the sample `.env` for the secondary provider
pub const GEMINI_KEY_PLACEHOLDER: &str = "your_gemini_api_key_here";

/// Gemini keys shorter than this are reported as suspicious at startup
pub const GEMINI_KEY_MIN_LEN: usize = 30;

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:19006,http://localhost:8081,http://192.168.1.*,exp://*.*.*.*:*,capacitor://localhost,http://localhost";

/// EcoQuest - climate education backend
#[derive(Parser, Debug, Clone)]
#[command(name = "ecoquest")]
#[command(about = "Climate education backend: onboarding, footprint estimates, AI lessons")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGO_URL", default_value = "mongodb://localhost:27017")]
    pub mongo_url: String,

    /// MongoDB database name
    #[arg(long, env = "DB_NAME", default_value = "ecoquest")]
    pub db_name: String,

    /// Groq API key (primary provider)
    #[arg(long, env = "GROQ_API_KEY")]
    pub groq_api_key: Option<String>,

    /// Groq OpenAI-compatible base URL
    #[arg(long, env = "GROQ_BASE_URL", default_value = GROQ_BASE_URL)]
    pub groq_base_url: String,

    /// Model for JSON-shaped generation
    #[arg(long, env = "GROQ_JSON_MODEL", default_value = DEFAULT_JSON_MODEL)]
    pub groq_json_model: String,

    /// Model for freeform generation
    #[arg(long, env = "GROQ_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL)]
    pub groq_text_model: String,

    /// Gemini API key (secondary provider)
    #[arg(long, env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// Gemini REST base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub gemini_model: String,

    /// Enable development mode (in-memory store when MongoDB is unreachable)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Allowed CORS origins, comma separated; `*` matches any run of characters
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',', default_value = DEFAULT_CORS_ORIGINS)]
    pub cors_origins: Vec<String>,

    /// Public backend URL, reported for the mobile frontend
    #[arg(long, env = "EXPO_PUBLIC_BACKEND_URL", default_value = "http://localhost:8000")]
    pub backend_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Key value with placeholders and blanks treated as absent
fn usable_key<'a>(key: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != placeholder)
}

impl Args {
    pub fn groq_key(&self) -> Option<&str> {
        usable_key(self.groq_api_key.as_deref(), GROQ_KEY_PLACEHOLDER)
    }

    pub fn gemini_key(&self) -> Option<&str> {
        usable_key(self.gemini_api_key.as_deref(), GEMINI_KEY_PLACEHOLDER)
    }

    /// Whether the configured Gemini key looks too short to be real
    pub fn gemini_key_suspicious(&self) -> bool {
        self.gemini_key()
            .map(|k| k.len() < GEMINI_KEY_MIN_LEN)
            .unwrap_or(false)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.db_name.trim().is_empty() {
            return Err("DB_NAME must not be empty".to_string());
        }

        if self.listen.port() == 0 {
            return Err("LISTEN must name a non-zero port".to_string());
        }

        Ok(())
    }
}
