//! Registration endpoints: CRUD, per-marathon listing, and the registration
//! counter side effect.

use crate::api::models::common::{DeleteResponse, InsertResponse, UpdateResponse};
use crate::api::models::registrations::{
    validate_registration_create, validate_registration_update, ListRegistrationsQuery,
};
use crate::db::handlers::{Marathons, Registrations, Repository};
use crate::errors::{Error, Result};
use crate::types::{document_to_json, parse_object_id};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

/// List registrations
#[utoipa::path(
    get,
    path = "/registrations",
    tag = "registrations",
    summary = "List registrations",
    params(ListRegistrationsQuery),
    responses(
        (status = 200, description = "Registrations matching the query", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<Value>> {
    let repo = Registrations::new(&state.db);
    let documents = repo.list(&query.into_filter()).await?;

    Ok(Json(Value::Array(documents.into_iter().map(document_to_json).collect())))
}

/// List registrations for one marathon
#[utoipa::path(
    get,
    path = "/registrations/marathons/{marathon_id}",
    tag = "registrations",
    summary = "List registrations for one marathon",
    params(("marathon_id" = String, Path, description = "Marathon id as stored on the registration")),
    responses(
        (status = 200, description = "Registrations whose marathon_id equals the path segment", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_registrations_by_marathon(
    State(state): State<AppState>,
    Path(marathon_id): Path<String>,
) -> Result<Json<Value>> {
    let repo = Registrations::new(&state.db);
    // The id is matched verbatim against the stored string, never parsed.
    let documents = repo.list_by_marathon(&marathon_id).await?;

    Ok(Json(Value::Array(documents.into_iter().map(document_to_json).collect())))
}

/// Get a registration by id
#[utoipa::path(
    get,
    path = "/registrations/{id}",
    tag = "registrations",
    summary = "Get a registration",
    params(("id" = String, Path, description = "Registration id (24 character hex string)")),
    responses(
        (status = 200, description = "The registration document", body = serde_json::Value),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No registration with this id"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_object_id(&id, "registration")?;

    let repo = Registrations::new(&state.db);
    let document = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound { resource: "registration".to_string() })?;

    Ok(Json(document_to_json(document)))
}

/// Resolve the marathon whose counter a stored registration should bump.
///
/// `None` means the stored `marathon_id` is not a well-formed ObjectId hex
/// string, so no marathon document can match it.
fn counter_target(document: &mongodb::bson::Document) -> Option<ObjectId> {
    ObjectId::parse_str(document.get_str("marathon_id").unwrap_or_default()).ok()
}

/// Create a registration
#[utoipa::path(
    post,
    path = "/registrations",
    tag = "registrations",
    summary = "Create a registration",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Registration created", body = InsertResponse),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_registration(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<InsertResponse>)> {
    let document = validate_registration_create(&payload)?;

    let repo = Registrations::new(&state.db);
    let id = repo.create(&document).await?;

    // Bump the marathon's registration counter. The insert above already
    // committed, so a counter miss is logged rather than rolled back.
    match counter_target(&document) {
        Some(marathon_id) => {
            let matched = Marathons::new(&state.db).increment_registration_count(marathon_id).await?;
            if matched == 0 {
                tracing::warn!(%marathon_id, "Registration references a marathon that does not exist, counter not updated");
            }
        }
        None => {
            tracing::warn!(
                marathon_id = document.get_str("marathon_id").unwrap_or_default(),
                "Registration carries a malformed marathon id, counter not updated"
            );
        }
    }

    Ok((StatusCode::CREATED, Json(InsertResponse { inserted_id: id.to_hex() })))
}

/// Update a registration
#[utoipa::path(
    patch,
    path = "/registrations/{id}",
    tag = "registrations",
    summary = "Update a registration",
    params(("id" = String, Path, description = "Registration id (24 character hex string)")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Update counts; matchedCount is 0 when the id matched nothing", body = UpdateResponse),
        (status = 400, description = "Malformed id or invalid patch"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<UpdateResponse>> {
    let id = parse_object_id(&id, "registration")?;
    let patch = validate_registration_update(&payload)?;

    let repo = Registrations::new(&state.db);
    let report = repo.update(id, &patch).await?;

    Ok(Json(report.into()))
}

/// Delete a registration
#[utoipa::path(
    delete,
    path = "/registrations/{id}",
    tag = "registrations",
    summary = "Delete a registration",
    params(("id" = String, Path, description = "Registration id (24 character hex string)")),
    responses(
        (status = 200, description = "Delete count; deletedCount is 0 when the id matched nothing", body = DeleteResponse),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_object_id(&id, "registration")?;

    let repo = Registrations::new(&state.db);
    let deleted_count = repo.delete(id).await?;

    Ok(Json(DeleteResponse { deleted_count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::Database;
    use axum::routing::{get, post};
    use axum_test::TestServer;
    use serde_json::json;

    // Validation happens before any query is issued, so these tests run
    // against a client that never connects.
    async fn test_server() -> TestServer {
        let config = Config::default();
        let db = Database::build(&config.database).await.unwrap();

        let app = axum::Router::new()
            .route("/registrations", post(create_registration))
            .route(
                "/registrations/{id}",
                get(get_registration).patch(update_registration).delete(delete_registration),
            )
            .with_state(AppState { db, config });

        TestServer::new(app).unwrap()
    }

    #[test]
    fn test_counter_target_resolves_stored_reference() {
        let document = mongodb::bson::doc! { "marathon_id": "66b2f0a1c2d3e4f5a6b7c8d9", "email": "runner@example.com" };

        let target = counter_target(&document).unwrap();
        assert_eq!(target.to_hex(), "66b2f0a1c2d3e4f5a6b7c8d9");
    }

    #[test]
    fn test_counter_target_skips_unresolvable_references() {
        // Malformed ids and non-string ids skip the increment instead of failing the create
        for document in [
            mongodb::bson::doc! { "marathon_id": "not-a-hex-id" },
            mongodb::bson::doc! { "marathon_id": "" },
            mongodb::bson::doc! { "marathon_id": 42 },
            mongodb::bson::doc! { "email": "runner@example.com" },
        ] {
            assert!(counter_target(&document).is_none(), "expected no target for {document}");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_create_rejects_missing_marathon_id() {
        let server = test_server().await;

        let response = server
            .post("/registrations")
            .json(&json!({ "email": "runner@example.com" }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "marathon_id is required and must be a non-empty string");
    }

    #[test_log::test(tokio::test)]
    async fn test_get_rejects_malformed_id() {
        let server = test_server().await;

        let response = server.get("/registrations/zzz").await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "invalid registration id: expected a 24 character hex string");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_rejects_bad_email() {
        let server = test_server().await;

        let response = server
            .patch("/registrations/66b2f0a1c2d3e4f5a6b7c8d9")
            .json(&json!({ "email": "not-an-email" }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }
}
