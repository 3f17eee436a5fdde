//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using the official MongoDB
//! driver. It follows the Repository pattern to provide clean abstractions over
//! collection operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - filters & queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  Database   │  (collection handles over one shared client)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   MongoDB   │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`errors`]: Database-specific error types
//!
//! # Connection Model
//!
//! [`Database`] wraps one `mongodb::Client` for the process lifetime; the
//! client maintains its own connection pool internally and is cheap to clone.
//! [`Database::connect`] verifies the deployment with an admin `ping` before
//! the server accepts traffic, so a bad connection string fails startup rather
//! than the first request. Documents are schemaless: repositories read and
//! write raw `bson::Document`s and the API layer decides which fields to
//! validate or render.

pub mod errors;
pub mod handlers;

use crate::config::DatabaseConfig;
use crate::db::errors::{DbError, Result};
use mongodb::{
    Client, Collection,
    bson::{Document, doc},
    options::{ClientOptions, ServerApi, ServerApiVersion},
};
use tracing::{info, instrument};

/// Handle to the MongoDB deployment, cloned into handlers through `AppState`.
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    name: String,
}

impl Database {
    /// Connect to the configured deployment and verify it with an admin ping.
    ///
    /// The ping is the fail-fast gate: without it the driver would connect
    /// lazily and a bad URL would only surface on the first query.
    #[instrument(skip_all, fields(database = %config.name))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = Self::build(config).await?;

        db.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DbError::Connection {
                message: format!("ping failed: {e}"),
            })?;

        info!("Connected to MongoDB, database '{}'", db.name);
        Ok(db)
    }

    /// Build the client without touching the network.
    ///
    /// Used by [`Database::connect`] and by route tests that construct app
    /// state but never issue a query.
    pub async fn build(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.url).await.map_err(|e| DbError::Connection {
            message: format!("invalid connection string: {e}"),
        })?;

        // Stable API V1, strict mode, so driver upgrades cannot change query behavior
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options).map_err(|e| DbError::Connection { message: e.to_string() })?;

        Ok(Self {
            client,
            name: config.name.clone(),
        })
    }

    /// Name of the database holding the marathon collections.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `marathons` collection.
    pub fn marathons(&self) -> Collection<Document> {
        self.client.database(&self.name).collection("marathons")
    }

    /// The `registrations` collection.
    pub fn registrations(&self) -> Collection<Document> {
        self.client.database(&self.name).collection("registrations")
    }

    /// The `marathonTips` collection.
    pub fn tips(&self) -> Collection<Document> {
        self.client.database(&self.name).collection("marathonTips")
    }
}
