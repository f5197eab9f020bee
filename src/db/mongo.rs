//! MongoDB client and collection wrapper

use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::{options::IndexOptions, results::UpdateResult, Client, Collection, IndexModel};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::db::schemas::{Metadata, ProgressDoc, UserDoc, PROGRESS_COLLECTION, USER_COLLECTION};
use crate::db::store::{DocumentStore, SaveOutcome};
use crate::types::{EcoQuestError, Result};

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Trait for schemas with mutable metadata
pub trait MutMetadata {
    fn mut_metadata(&mut self) -> &mut Metadata;
}

const FAST_TIMEOUTS: &str = "serverSelectionTimeoutMS=3000&connectTimeoutMS=3000";

/// Short server selection so an unreachable MongoDB fails fast
fn with_fast_timeouts(uri: &str) -> String {
    if uri.contains('?') {
        format!("{}&{}", uri, FAST_TIMEOUTS)
    } else {
        format!("{}?{}", uri, FAST_TIMEOUTS)
    }
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and verify the connection with a ping
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        let client = Client::with_uri_str(with_fast_timeouts(uri))
            .await
            .map_err(|e| EcoQuestError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        let mongo = Self {
            client,
            db_name: db_name.to_string(),
        };
        mongo.ping().await?;

        info!("Connected to MongoDB database '{}'", db_name);
        Ok(mongo)
    }

    /// Run the `ping` admin command against the database
    pub async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| EcoQuestError::Database(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }

    /// Get a typed collection
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes + MutMetadata,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes + MutMetadata,
{
    /// Create a new collection and apply indexes
    pub async fn new(client: &Client, db_name: &str, collection_name: &str) -> Result<Self> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<()> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| EcoQuestError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document, setting metadata timestamps
    pub async fn insert_one(&self, mut item: T) -> Result<()> {
        item.mut_metadata().touch();

        self.inner
            .insert_one(item)
            .await
            .map_err(|e| EcoQuestError::Database(format!("Insert failed: {}", e)))?;

        Ok(())
    }

    /// Find one document by filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.inner
            .find_one(filter)
            .await
            .map_err(|e| EcoQuestError::Database(format!("Find failed: {}", e)))
    }

    /// Replace the matching document wholesale, inserting it when absent
    pub async fn replace_one_upsert(&self, filter: Document, mut item: T) -> Result<UpdateResult> {
        item.mut_metadata().touch();

        self.inner
            .replace_one(filter, item)
            .upsert(true)
            .await
            .map_err(|e| EcoQuestError::Database(format!("Replace failed: {}", e)))
    }
}

/// MongoDB-backed document store
pub struct MongoStore {
    client: MongoClient,
    users: MongoCollection<UserDoc>,
    progress: MongoCollection<ProgressDoc>,
}

impl MongoStore {
    /// Open the EcoQuest collections, applying their indexes once
    pub async fn new(client: MongoClient) -> Result<Self> {
        let users = client.collection::<UserDoc>(USER_COLLECTION).await?;
        let progress = client.collection::<ProgressDoc>(PROGRESS_COLLECTION).await?;
        Ok(Self {
            client,
            users,
            progress,
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<()> {
        self.client.ping().await
    }

    async fn insert_user(&self, user: UserDoc) -> Result<()> {
        let id = user.id.clone();
        self.users.insert_one(user).await?;
        debug!(user_id = %id, db = %self.client.db_name(), "User document inserted");
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserDoc>> {
        self.users.find_one(doc! { "id": user_id }).await
    }

    async fn save_progress(&self, progress: ProgressDoc) -> Result<SaveOutcome> {
        let filter = doc! { "user_id": progress.user_id.clone() };
        let result = self.progress.replace_one_upsert(filter, progress).await?;
        Ok(SaveOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted: result.upserted_id.is_some(),
        })
    }

    async fn find_progress(&self, user_id: &str) -> Result<Option<ProgressDoc>> {
        self.progress.find_one(doc! { "user_id": user_id }).await
    }
}
