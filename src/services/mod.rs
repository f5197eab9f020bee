//! Domain services: footprint estimation, content generation, operations

pub mod content;
pub mod eco;
pub mod fallback;
pub mod impact;
pub mod prompts;

pub use content::{ContentFormat, ContentGenerator, GenerationOutcome, GenerationProfile};
pub use eco::EcoService;
pub use impact::ImpactEstimate;
