//! Persistence for users and progress

pub mod memory;
pub mod mongo;
pub mod schemas;
pub mod store;

pub use memory::MemoryStore;
pub use mongo::{MongoClient, MongoCollection, MongoStore};
pub use store::{DocumentStore, SaveOutcome};
