//! EcoQuest - climate education backend
//!
//! Serves a mobile learning app: onboarding with AI-personalised learning
//! paths, carbon footprint estimates, "what if" scenarios, local action ideas
//! and lessons.
//!
//! ## Components
//!
//! - **Impact estimator**: additive daily CO2 model over four habit categories
//! - **Content generator**: Groq first, Gemini once on failure, then a fixed text
//! - **Operations**: the /api request pipelines with static fallbacks
//! - **Store**: MongoDB, or an in-memory map for dev mode and tests

pub mod config;
pub mod db;
pub mod llm;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{EcoQuestError, Result};
