pub mod database;
pub mod memory;
pub mod store;
pub mod token;

pub use database::{Database, MemoryDb, MongoDb};
pub use memory::MemoryCollection;
pub use store::{DocumentStore, MongoCollection, UpdateOutcome};
pub use token::{TokenIssuer, ACCESS_TOKEN_COOKIE};
