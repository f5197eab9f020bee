//! Request and response bodies for the /api routes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::{KnowledgeLevel, LearningStyle};

#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingRequest {
    pub age: i32,
    /// e.g. "oceans", "forests", "energy", "waste", "transport"
    pub interests: Vec<String>,
    pub knowledge_level: KnowledgeLevel,
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingResponse {
    pub user_id: String,
    pub personalized_path: serde_json::Value,
    pub welcome_message: String,
}

/// Self-reported daily habits.
///
/// Values are kept as raw strings: anything outside the known options is
/// priced with the category default instead of being rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct HabitInput {
    pub user_id: String,
    /// "car", "bike", "walk", "public"
    pub transport: String,
    /// "meat", "vegetarian", "vegan", "pescatarian"
    pub diet: String,
    /// "low", "medium", "high"
    pub energy_usage: String,
    /// "minimal", "average", "high"
    pub waste_habits: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactSimulation {
    pub daily_co2: f64,
    pub weekly_co2: f64,
    pub yearly_co2: f64,
    pub suggestions: Vec<String>,
    pub positive_impact: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhatIfRequest {
    pub scenario: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfResponse {
    pub scenario_response: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalActionRequest {
    pub location: String,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAction {
    pub title: String,
    pub description: String,
    pub impact: String,
    /// "easy", "medium", "hard"
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalActionsResponse {
    pub local_actions: Vec<LocalAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LearningContentRequest {
    pub user_id: Option<String>,
    pub topic: Option<String>,
}

/// Either the parsed lesson or the fixed error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LearningContentResponse {
    Content { learning_content: serde_json::Value },
    Error { error: String },
}

/// User profile as returned by `GET /api/user/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub age: i32,
    pub interests: Vec<String>,
    pub knowledge_level: KnowledgeLevel,
    pub learning_style: LearningStyle,
    pub location: Option<String>,
    pub points: i32,
    pub level: i32,
    pub completed_quests: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_request_location_optional() {
        let request: OnboardingRequest = serde_json::from_str(
            r#"{"age": 25, "interests": ["oceans"], "knowledge_level": "beginner", "learning_style": "visual"}"#,
        )
        .unwrap();
        assert_eq!(request.location, None);
        assert_eq!(request.interests, vec!["oceans".to_string()]);
    }

    #[test]
    fn test_learning_content_request_empty_body() {
        let request: LearningContentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.user_id.is_none());
        assert!(request.topic.is_none());
    }

    #[test]
    fn test_learning_content_response_shapes() {
        let error = LearningContentResponse::Error {
            error: "nope".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({"error": "nope"})
        );

        let content = LearningContentResponse::Content {
            learning_content: serde_json::json!({"title": "Tides"}),
        };
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            serde_json::json!({"learning_content": {"title": "Tides"}})
        );
    }
}
