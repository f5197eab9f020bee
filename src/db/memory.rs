//! In-memory document store
//!
//! Used in dev mode when MongoDB is unreachable, and in tests. Same contract
//! as the MongoDB store, including the unique user id.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::db::schemas::{ProgressDoc, UserDoc};
use crate::db::store::{DocumentStore, SaveOutcome};
use crate::types::{EcoQuestError, Result};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, UserDoc>,
    progress: DashMap<String, ProgressDoc>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn progress_count(&self) -> usize {
        self.progress.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_user(&self, mut user: UserDoc) -> Result<()> {
        user.metadata.touch();
        match self.users.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(EcoQuestError::Database(format!(
                "Insert failed: duplicate user id {}",
                user.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserDoc>> {
        Ok(self.users.get(user_id).map(|u| u.clone()))
    }

    async fn save_progress(&self, mut progress: ProgressDoc) -> Result<SaveOutcome> {
        progress.metadata.touch();
        let outcome = match self.progress.insert(progress.user_id.clone(), progress.clone()) {
            Some(previous) => SaveOutcome {
                matched: 1,
                modified: u64::from(previous != progress),
                upserted: false,
            },
            None => SaveOutcome {
                matched: 0,
                modified: 0,
                upserted: true,
            },
        };
        Ok(outcome)
    }

    async fn find_progress(&self, user_id: &str) -> Result<Option<ProgressDoc>> {
        Ok(self.progress.get(user_id).map(|p| p.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HabitInput, KnowledgeLevel, LearningStyle, OnboardingRequest};

    fn user() -> UserDoc {
        UserDoc::from_onboarding(&OnboardingRequest {
            age: 30,
            interests: vec!["forests".to_string()],
            knowledge_level: KnowledgeLevel::Advanced,
            learning_style: LearningStyle::Reading,
            location: None,
        })
    }

    fn habits(user_id: &str, transport: &str) -> HabitInput {
        HabitInput {
            user_id: user_id.to_string(),
            transport: transport.to_string(),
            diet: "meat".to_string(),
            energy_usage: "medium".to_string(),
            waste_habits: "average".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        let user = user();
        let id = user.id.clone();

        store.insert_user(user).await.unwrap();

        let found = store.find_user(&id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_user_is_none() {
        let store = MemoryStore::new();
        assert!(store.find_user("never-inserted").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        let user = user();
        store.insert_user(user.clone()).await.unwrap();

        let err = store.insert_user(user).await.unwrap_err();
        assert!(matches!(err, EcoQuestError::Database(_)));
    }

    #[tokio::test]
    async fn test_progress_upsert_replaces_wholesale() {
        let store = MemoryStore::new();

        let first = store
            .save_progress(ProgressDoc::from_habits(&habits("u-1", "car"), 20.8))
            .await
            .unwrap();
        assert!(first.upserted);
        assert_eq!(first.matched, 0);

        let second = store
            .save_progress(ProgressDoc::from_habits(&habits("u-1", "bike"), 14.3))
            .await
            .unwrap();
        assert!(!second.upserted);
        assert_eq!(second.matched, 1);
        assert_eq!(second.modified, 1);

        assert_eq!(store.progress_count(), 1);
        let stored = store.find_progress("u-1").await.unwrap().unwrap();
        assert_eq!(stored.daily_habits.transport, "bike");
        assert_eq!(stored.current_co2_footprint, 14.3);
    }

    #[tokio::test]
    async fn test_ping() {
        let store = MemoryStore::new();
        tokio_test::assert_ok!(store.ping().await);
        assert_eq!(store.backend_name(), "memory");
    }
}
