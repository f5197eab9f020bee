//! Document store abstraction
//!
//! Operations consume this trait so the MongoDB backend can be swapped for the
//! in-memory one (dev mode without a database, tests).

use async_trait::async_trait;

use crate::db::schemas::{ProgressDoc, UserDoc};
use crate::types::Result;

/// Acknowledgement of a replace-with-upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub matched: u64,
    pub modified: u64,
    /// True when no document existed and one was inserted
    pub upserted: bool,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend label for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Check the store is reachable
    async fn ping(&self) -> Result<()>;

    /// Insert a new user; ids are unique
    async fn insert_user(&self, user: UserDoc) -> Result<()>;

    /// Look up a user by public id
    async fn find_user(&self, user_id: &str) -> Result<Option<UserDoc>>;

    /// Replace the user's progress document, inserting it if absent
    async fn save_progress(&self, progress: ProgressDoc) -> Result<SaveOutcome>;

    /// Look up the progress document of a user
    async fn find_progress(&self, user_id: &str) -> Result<Option<ProgressDoc>>;
}
