//! User document schema
//!
//! Learner profiles created at onboarding.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;
use crate::types::{KnowledgeLevel, LearningStyle, OnboardingRequest, User};

/// Collection name for users
pub const USER_COLLECTION: &str = "users";

/// User document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Public user identifier (uuid v4)
    pub id: String,

    pub age: i32,

    /// Interest tags in the order the user picked them
    pub interests: Vec<String>,

    pub knowledge_level: KnowledgeLevel,

    pub learning_style: LearningStyle,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub points: i32,

    #[serde(default = "default_level")]
    pub level: i32,

    #[serde(default)]
    pub completed_quests: Vec<String>,
}

fn default_level() -> i32 {
    1
}

impl UserDoc {
    /// Create a fresh user from an onboarding request
    pub fn from_onboarding(request: &OnboardingRequest) -> Self {
        Self {
            _id: None,
            metadata: Metadata::new(),
            id: uuid::Uuid::new_v4().to_string(),
            age: request.age,
            interests: request.interests.clone(),
            knowledge_level: request.knowledge_level,
            learning_style: request.learning_style,
            location: request.location.clone(),
            points: 0,
            level: default_level(),
            completed_quests: Vec::new(),
        }
    }

    /// API view of the stored document
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            age: self.age,
            interests: self.interests.clone(),
            knowledge_level: self.knowledge_level,
            learning_style: self.learning_style,
            location: self.location.clone(),
            points: self.points,
            level: self.level,
            completed_quests: self.completed_quests.clone(),
            created_at: self
                .metadata
                .created_at
                .map(|dt| dt.to_chrono())
                .unwrap_or_default(),
        }
    }
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "id": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for UserDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OnboardingRequest {
        OnboardingRequest {
            age: 14,
            interests: vec!["oceans".to_string(), "energy".to_string()],
            knowledge_level: KnowledgeLevel::Beginner,
            learning_style: LearningStyle::Visual,
            location: Some("Lisbon".to_string()),
        }
    }

    #[test]
    fn test_new_user_defaults() {
        let user = UserDoc::from_onboarding(&request());
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
        assert!(user.completed_quests.is_empty());
        assert!(uuid::Uuid::parse_str(&user.id).is_ok());
        assert!(user.metadata.created_at.is_some());
    }

    #[test]
    fn test_distinct_ids() {
        let a = UserDoc::from_onboarding(&request());
        let b = UserDoc::from_onboarding(&request());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_to_user_keeps_fields() {
        let doc = UserDoc::from_onboarding(&request());
        let user = doc.to_user();
        assert_eq!(user.id, doc.id);
        assert_eq!(user.interests, doc.interests);
        assert_eq!(user.location.as_deref(), Some("Lisbon"));
        assert_eq!(
            user.created_at.timestamp_millis(),
            doc.metadata.created_at.unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_bson_roundtrip_keeps_missing_defaults() {
        let stored = doc! {
            "id": "abc",
            "age": 30,
            "interests": ["forests"],
            "knowledge_level": "advanced",
            "learning_style": "reading",
        };
        let user: UserDoc = bson::from_document(stored).unwrap();
        assert_eq!(user.level, 1);
        assert_eq!(user.points, 0);
        assert_eq!(user.knowledge_level, KnowledgeLevel::Advanced);
        assert_eq!(user.location, None);
    }
}
