//! Base repository trait for collection operations.

use crate::db::errors::Result;
use mongodb::bson::oid::ObjectId;

/// Outcome of a merge-patch, mirroring the store's update result counts.
///
/// A zero `matched_count` is a legitimate outcome (the id referenced nothing),
/// not an error; callers decide what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    /// Documents the filter matched (0 or 1 for id-based updates)
    pub matched_count: u64,
    /// Documents actually rewritten (0 when the patch was a no-op)
    pub modified_count: u64,
}

/// Base repository trait providing common collection operations
///
/// This trait has separate associated types for create requests, update requests, and responses.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating documents
    type CreateRequest;

    /// The request type for updating documents
    type UpdateRequest;

    /// The response type returned by read operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Insert a new document, returning the store-assigned id
    async fn create(&self, request: &Self::CreateRequest) -> Result<ObjectId>;

    /// Get a document by ID
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List documents matching a filter
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Merge-patch a document by ID
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<UpdateReport>;

    /// Delete a document by ID, returning the deleted count
    async fn delete(&self, id: Self::Id) -> Result<u64>;
}
