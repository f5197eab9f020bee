//! User progress document schema
//!
//! One document per user, replaced wholesale on every impact calculation.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;
use crate::types::HabitInput;

/// Collection name for user progress
pub const PROGRESS_COLLECTION: &str = "user_progress";

/// Habits as submitted, keyed by category
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DailyHabits {
    pub transport: String,
    pub diet: String,
    pub energy: String,
    pub waste: String,
}

/// Progress document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProgressDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    #[serde(default)]
    pub metadata: Metadata,

    /// Owning user's public id
    pub user_id: String,

    /// Daily footprint in kg CO2
    pub current_co2_footprint: f64,

    pub daily_habits: DailyHabits,

    #[serde(default)]
    pub completed_actions: Vec<String>,

    #[serde(default)]
    pub streak_days: i32,

    pub last_activity: DateTime,
}

impl ProgressDoc {
    /// Fresh progress snapshot for a habit submission
    pub fn from_habits(input: &HabitInput, daily_co2: f64) -> Self {
        Self {
            _id: None,
            metadata: Metadata::new(),
            user_id: input.user_id.clone(),
            current_co2_footprint: daily_co2,
            daily_habits: DailyHabits {
                transport: input.transport.clone(),
                diet: input.diet.clone(),
                energy: input.energy_usage.clone(),
                waste: input.waste_habits.clone(),
            },
            completed_actions: Vec::new(),
            streak_days: 0,
            last_activity: DateTime::now(),
        }
    }
}

impl IntoIndexes for ProgressDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "user_id": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for ProgressDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_habits_maps_category_keys() {
        let input = HabitInput {
            user_id: "u-1".to_string(),
            transport: "bike".to_string(),
            diet: "vegan".to_string(),
            energy_usage: "low".to_string(),
            waste_habits: "minimal".to_string(),
        };
        let progress = ProgressDoc::from_habits(&input, 5.8);

        assert_eq!(progress.user_id, "u-1");
        assert_eq!(progress.current_co2_footprint, 5.8);
        assert_eq!(progress.daily_habits.energy, "low");
        assert_eq!(progress.daily_habits.waste, "minimal");
        assert_eq!(progress.streak_days, 0);
        assert!(progress.completed_actions.is_empty());

        let stored = bson::to_document(&progress).unwrap();
        let habits = stored.get_document("daily_habits").unwrap();
        assert_eq!(habits.get_str("transport").unwrap(), "bike");
        assert!(!stored.contains_key("_id"));
    }
}
