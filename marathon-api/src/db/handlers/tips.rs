//! Repository for the read-only `marathonTips` collection.

use crate::db::Database;
use crate::db::errors::Result;
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc},
};
use tracing::instrument;

/// Repository for marathon tips. The collection is reference content with no
/// mutation endpoints, so this exposes a plain list and skips the
/// [`crate::db::handlers::Repository`] trait.
pub struct Tips {
    collection: Collection<Document>,
}

impl Tips {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.tips() }
    }

    #[instrument(skip(self), err)]
    pub async fn list(&self) -> Result<Vec<Document>> {
        let cursor = self.collection.find(doc! {}).await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }
}
