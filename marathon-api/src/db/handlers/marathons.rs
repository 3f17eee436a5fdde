//! Repository for the `marathons` collection.
//!
//! Marathon documents are schemaless; this repository builds the filter, sort
//! and pipeline documents for the operations the API exposes and leaves field
//! validation to the API layer.

use crate::db::Database;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::{Repository, UpdateReport};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

/// Sort direction for the `startRegistrationDate` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse the `?sort=` query value: `asc` selects ascending, anything else
    /// keeps the default descending order.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Filter, ordering and cap for marathon listings.
#[derive(Debug, Clone, Default)]
pub struct MarathonFilter {
    /// Exact-match owner email
    pub email: Option<String>,
    /// Ordering on `startRegistrationDate`
    pub sort: SortOrder,
    /// Result cap; 0 means unbounded
    pub limit: i64,
}

impl MarathonFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Cap the number of results. Zero (the default) means unbounded, matching
    /// the store's own limit semantics.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit.max(0);
        self
    }
}

fn filter_document(filter: &MarathonFilter) -> Document {
    let mut doc = Document::new();
    if let Some(email) = &filter.email {
        doc.insert("email", email.as_str());
    }
    doc
}

fn sort_document(order: SortOrder) -> Document {
    let direction: i32 = match order {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    };
    doc! { "startRegistrationDate": direction }
}

fn upcoming_pipeline(today: &str, size: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "marathonStartDate": { "$gte": today } } },
        doc! { "$sample": { "size": size } },
    ]
}

fn increment_document() -> Document {
    doc! { "$inc": { "totalRegistrationCount": 1 } }
}

/// Repository for marathon events.
pub struct Marathons {
    collection: Collection<Document>,
}

#[async_trait::async_trait]
impl Repository for Marathons {
    type CreateRequest = Document;
    type UpdateRequest = Document;
    type Response = Document;
    type Id = ObjectId;
    type Filter = MarathonFilter;

    #[instrument(skip(self, request), fields(title = request.get_str("title").unwrap_or("")), err)]
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

    #[instrument(skip(self, filter), fields(email = filter.email.as_deref().unwrap_or(""), limit = filter.limit), err)]
    async fn list(&self, filter: &MarathonFilter) -> Result<Vec<Document>> {
        let cursor = self
            .collection
            .find(filter_document(filter))
            .sort(sort_document(filter.sort))
            .limit(filter.limit)
            .await?;

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

impl Marathons {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.marathons(),
        }
    }

    /// Uniformly sample up to `size` marathons whose start date is today or
    /// later.
    ///
    /// The comparison is a plain string `$gte` against the current calendar
    /// date in `YYYY-MM-DD` form. ISO dates sort lexicographically, and the
    /// string comparison type-brackets away non-string values, so this is safe
    /// on schemaless documents. The sample may be smaller than `size` when
    /// fewer events match.
    #[instrument(skip(self), err)]
    pub async fn sample_upcoming(&self, size: i64) -> Result<Vec<Document>> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let cursor = self.collection.aggregate(upcoming_pipeline(&today, size)).await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    /// Add one to a marathon's registration counter.
    ///
    /// Returns the number of documents matched, so callers can tell when the
    /// id referenced nothing. `$inc` creates the counter field on documents
    /// that predate it.
    #[instrument(skip(self), fields(marathon_id = %id), err)]
    pub async fn increment_registration_count(&self, id: ObjectId) -> Result<u64> {
        let result = self.collection.update_one(doc! { "_id": id }, increment_document()).await?;

        Ok(result.matched_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_document_is_empty_by_default() {
        let filter = MarathonFilter::new();
        assert_eq!(filter_document(&filter), Document::new());
    }

    #[test]
    fn filter_document_matches_email_exactly() {
        let filter = MarathonFilter::new().with_email(Some("runner@example.com".to_string()));
        assert_eq!(filter_document(&filter), doc! { "email": "runner@example.com" });
    }

    #[test]
    fn sort_document_directions() {
        assert_eq!(sort_document(SortOrder::Desc), doc! { "startRegistrationDate": -1 });
        assert_eq!(sort_document(SortOrder::Asc), doc! { "startRegistrationDate": 1 });
    }

    #[test]
    fn sort_order_parses_query_values() {
        assert_eq!(SortOrder::from_query(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_query(Some("desc")), SortOrder::Desc);
        // exact match only; any other value keeps the descending default
        assert_eq!(SortOrder::from_query(Some("ASC")), SortOrder::Desc);
        assert_eq!(SortOrder::from_query(None), SortOrder::Desc);
    }

    #[test]
    fn upcoming_pipeline_matches_then_samples() {
        let pipeline = upcoming_pipeline("2026-08-25", 6);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline[0], doc! { "$match": { "marathonStartDate": { "$gte": "2026-08-25" } } });
        assert_eq!(pipeline[1], doc! { "$sample": { "size": 6i64 } });
    }

    #[test]
    fn increment_document_bumps_counter_by_one() {
        let update = increment_document();

        let inc = update.get_document("$inc").unwrap();
        assert_eq!(inc.len(), 1, "the increment must touch nothing but the counter");
        assert_eq!(inc.get_i32("totalRegistrationCount").unwrap(), 1);
    }

    #[test]
    fn filter_limit_never_negative() {
        let filter = MarathonFilter::new().with_limit(-5);
        assert_eq!(filter.limit, 0);
        let filter = MarathonFilter::new().with_limit(9);
        assert_eq!(filter.limit, 9);
    }
}
