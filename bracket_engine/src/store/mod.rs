//! Document store for bracket documents.
//!
//! The engine never touches storage; the tournament actors load a document
//! when they start and save it after every successful mutation. Two backends
//! are provided:
//!
//! - [`MemoryBracketStore`]: in-process map, used by default and in tests
//! - [`PgBracketStore`]: PostgreSQL, one JSONB document per tournament

use crate::tournament::models::{BracketDocument, TournamentId};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod errors;
pub mod memory;
pub mod postgres;

pub use config::DatabaseConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryBracketStore;
pub use postgres::PgBracketStore;

/// Trait for bracket document persistence
#[async_trait]
pub trait BracketStore: Send + Sync {
    /// Load the document for a tournament, if one was saved
    async fn load(&self, tournament_id: &str) -> StoreResult<Option<BracketDocument>>;

    /// Store or overwrite the document for its tournament
    async fn save(&self, document: &BracketDocument) -> StoreResult<()>;

    /// Remove a tournament's document, returning whether one existed
    async fn delete(&self, tournament_id: &str) -> StoreResult<bool>;

    /// IDs of all stored tournaments
    async fn list_ids(&self) -> StoreResult<Vec<TournamentId>>;
}

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Arguments
    ///
    /// * `config` - Database configuration
    ///
    /// # Returns
    ///
    /// * `Result<Database, sqlx::Error>` - Database instance or error
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
