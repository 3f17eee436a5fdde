//! Repository for the `registrations` collection.
//!
//! Registrations reference their marathon through a `marathon_id` field
//! holding the hex string form of the marathon's ObjectId, plus a denormalized
//! `title` copy used for substring search. Neither is enforced by the store.

use crate::db::Database;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::{Repository, UpdateReport};
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

/// Filter for registration listings.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    /// Exact-match participant email
    pub email: Option<String>,
    /// Case-insensitive pattern match on the denormalized marathon title
    pub title: Option<String>,
}

impl RegistrationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }
}

fn filter_document(filter: &RegistrationFilter) -> Document {
    let mut doc = Document::new();
    if let Some(email) = &filter.email {
        doc.insert("email", email.as_str());
    }
    if let Some(title) = &filter.title {
        doc.insert("title", doc! { "$regex": title.as_str(), "$options": "i" });
    }
    doc
}

/// Repository for participant registrations.
pub struct Registrations {
    collection: Collection<Document>,
}

#[async_trait::async_trait]
impl Repository for Registrations {
    type CreateRequest = Document;
    type UpdateRequest = Document;
    type Response = Document;
    type Id = ObjectId;
    type Filter = RegistrationFilter;

    #[instrument(skip(self, request), fields(marathon_id = request.get_str("marathon_id").unwrap_or("")), err)]
    async fn create(&self, request: &Document) -> Result<ObjectId> {
        let result = self.collection.insert_one(request).await?;
        result.inserted_id.as_object_id().ok_or_else(|| DbError::Query {
            message: "insert acknowledged without an ObjectId".to_string(),
        })
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Document>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document)
    }

    #[instrument(skip(self, filter), fields(email = filter.email.as_deref().unwrap_or("")), err)]
    async fn list(&self, filter: &RegistrationFilter) -> Result<Vec<Document>> {
        let cursor = self.collection.find(filter_document(filter)).await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    #[instrument(skip(self, request), fields(id = %id), err)]
    async fn update(&self, id: ObjectId, request: &Document) -> Result<UpdateReport> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": request.clone() })
            .await?;

        Ok(UpdateReport {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: ObjectId) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}

impl Registrations {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.registrations(),
        }
    }

    /// List every registration whose `marathon_id` equals the given string.
    ///
    /// This is a verbatim string comparison: references stored in any other
    /// form (or ids in a different case) never match. The write side always
    /// stores the hex string, so well-formed references round-trip.
    #[instrument(skip(self), err)]
    pub async fn list_by_marathon(&self, marathon_id: &str) -> Result<Vec<Document>> {
        let cursor = self.collection.find(doc! { "marathon_id": marathon_id }).await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }
}
