//! Mutation response envelopes shared by the marathon and registration routes.
//!
//! Field names mirror the store's own result objects (`insertedId`,
//! `matchedCount`, ...), the shape the frontend already consumes.

use crate::db::handlers::UpdateReport;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for successful inserts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    /// Hex form of the store-assigned ObjectId
    pub inserted_id: String,
}

/// Response body for merge-patch updates.
///
/// A `matchedCount` of 0 means the id referenced nothing; the operation is
/// still a success at the HTTP level.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateReport> for UpdateResponse {
    fn from(report: UpdateReport) -> Self {
        Self {
            matched_count: report.matched_count,
            modified_count: report.modified_count,
        }
    }
}

/// Response body for deletes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}
