//! Training tip endpoint. Read-only content, no filters.

use crate::db::handlers::Tips;
use crate::errors::Result;
use crate::types::document_to_json;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

/// List marathon training tips
#[utoipa::path(
    get,
    path = "/marathonTips",
    tag = "tips",
    summary = "List marathon training tips",
    responses(
        (status = 200, description = "Every tip document in the collection", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_tips(State(state): State<AppState>) -> Result<Json<Value>> {
    let repo = Tips::new(&state.db);
    let documents = repo.list().await?;

    Ok(Json(Value::Array(documents.into_iter().map(document_to_json).collect())))
}
