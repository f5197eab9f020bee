//! Shared types: errors, profile enums, API bodies

pub mod api;
pub mod error;
pub mod profile;

pub use api::*;
pub use error::{EcoQuestError, Result};
pub use profile::{KnowledgeLevel, LearningStyle};
