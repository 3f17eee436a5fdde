//! Marathon endpoints: CRUD plus the upcoming-marathons sample.
//!
//! Marathons are schemaless documents; handlers return them as raw JSON and
//! only validate the handful of fields the API itself relies on.

use crate::api::models::common::{DeleteResponse, InsertResponse, UpdateResponse};
use crate::api::models::marathons::{
    validate_marathon_create, validate_marathon_update, ListMarathonsQuery,
};
use crate::db::handlers::{Marathons, Repository};
use crate::errors::{Error, Result};
use crate::types::{document_to_json, parse_object_id};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// How many marathons the discovery endpoint samples per request.
const UPCOMING_SAMPLE_SIZE: i64 = 6;

/// List marathons
#[utoipa::path(
    get,
    path = "/marathons",
    tag = "marathons",
    summary = "List marathons",
    params(ListMarathonsQuery),
    responses(
        (status = 200, description = "Marathons matching the query", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_marathons(
    State(state): State<AppState>,
    Query(query): Query<ListMarathonsQuery>,
) -> Result<Json<Value>> {
    let repo = Marathons::new(&state.db);
    let documents = repo.list(&query.into_filter()).await?;

    Ok(Json(Value::Array(documents.into_iter().map(document_to_json).collect())))
}

/// Sample upcoming marathons
#[utoipa::path(
    get,
    path = "/upcoming-marathons",
    tag = "marathons",
    summary = "Sample upcoming marathons",
    responses(
        (status = 200, description = "Random sample of marathons that start today or later", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upcoming_marathons(State(state): State<AppState>) -> Result<Json<Value>> {
    let repo = Marathons::new(&state.db);
    let documents = repo.sample_upcoming(UPCOMING_SAMPLE_SIZE).await?;

    Ok(Json(Value::Array(documents.into_iter().map(document_to_json).collect())))
}

/// Get a marathon by id
#[utoipa::path(
    get,
    path = "/marathons/{id}",
    tag = "marathons",
    summary = "Get a marathon",
    params(("id" = String, Path, description = "Marathon id (24 character hex string)")),
    responses(
        (status = 200, description = "The marathon document", body = serde_json::Value),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No marathon with this id"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_marathon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_object_id(&id, "marathon")?;

    let repo = Marathons::new(&state.db);
    let document = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound { resource: "marathon".to_string() })?;

    Ok(Json(document_to_json(document)))
}

/// Create a marathon
#[utoipa::path(
    post,
    path = "/marathons",
    tag = "marathons",
    summary = "Create a marathon",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Marathon created", body = InsertResponse),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_marathon(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<InsertResponse>)> {
    let document = validate_marathon_create(&payload)?;

    let repo = Marathons::new(&state.db);
    let id = repo.create(&document).await?;

    Ok((StatusCode::CREATED, Json(InsertResponse { inserted_id: id.to_hex() })))
}

/// Update a marathon
#[utoipa::path(
    patch,
    path = "/marathons/{id}",
    tag = "marathons",
    summary = "Update a marathon",
    params(("id" = String, Path, description = "Marathon id (24 character hex string)")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Update counts; matchedCount is 0 when the id matched nothing", body = UpdateResponse),
        (status = 400, description = "Malformed id or invalid patch"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_marathon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<UpdateResponse>> {
    let id = parse_object_id(&id, "marathon")?;
    let patch = validate_marathon_update(&payload)?;

    let repo = Marathons::new(&state.db);
    let report = repo.update(id, &patch).await?;

    Ok(Json(report.into()))
}

/// Delete a marathon
#[utoipa::path(
    delete,
    path = "/marathons/{id}",
    tag = "marathons",
    summary = "Delete a marathon",
    params(("id" = String, Path, description = "Marathon id (24 character hex string)")),
    responses(
        (status = 200, description = "Delete count; deletedCount is 0 when the id matched nothing", body = DeleteResponse),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_marathon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_object_id(&id, "marathon")?;

    let repo = Marathons::new(&state.db);
    let deleted_count = repo.delete(id).await?;

    Ok(Json(DeleteResponse { deleted_count }))
}
