//! Database schemas for EcoQuest
//!
//! Defines MongoDB document structures for users and their progress.

mod metadata;
mod progress;
mod user;

pub use metadata::Metadata;
pub use progress::{DailyHabits, ProgressDoc, PROGRESS_COLLECTION};
pub use user::{UserDoc, USER_COLLECTION};
