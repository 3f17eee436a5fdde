//! Repository implementations for collection access.
//!
//! This module provides repository structs for each collection in the system.
//! Repositories follow a consistent pattern and implement the [`Repository`] trait.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a `Collection<Document>` handle from [`crate::db::Database`]
//! - Builds filter/sort/pipeline documents from typed filter structs
//! - Returns raw `bson::Document`s; the API layer renders them as wire JSON
//! - Leaves payload validation to the API models (documents are schemaless)
//!
//! # Available Repositories
//!
//! - [`Marathons`]: marathon events, including the upcoming-sample pipeline and
//!   the registration counter increment
//! - [`Registrations`]: participant registrations, including the by-marathon
//!   listing
//! - [`Tips`]: read-only marathon tips
//!
//! # Common Pattern
//!
//! ```ignore
//! use marathon_api::db::handlers::{Marathons, Repository};
//! use marathon_api::db::handlers::marathons::MarathonFilter;
//!
//! async fn example(db: &marathon_api::db::Database) -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = Marathons::new(db);
//!     let events = repo.list(&MarathonFilter::new()).await?;
//!     Ok(())
//! }
//! ```

pub mod marathons;
pub mod registrations;
pub mod repository;
pub mod tips;

pub use marathons::Marathons;
pub use registrations::Registrations;
pub use repository::{Repository, UpdateReport};
pub use tips::Tips;
