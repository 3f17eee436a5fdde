//! Marathon list query parameters and payload validation.

use crate::db::handlers::marathons::{MarathonFilter, SortOrder};
use crate::errors::Error;
use chrono::NaiveDate;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing marathons
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListMarathonsQuery {
    /// Only marathons owned by this email (exact match)
    pub email: Option<String>,
    /// Maximum number of results; 0 or absent returns all
    pub limit: Option<i64>,
    /// Ordering on `startRegistrationDate`: `asc` or `desc` (default)
    pub sort: Option<String>,
}

impl ListMarathonsQuery {
    pub fn into_filter(self) -> MarathonFilter {
        MarathonFilter::new()
            .with_email(self.email)
            .with_sort(SortOrder::from_query(self.sort.as_deref()))
            .with_limit(self.limit.unwrap_or(0))
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation { message: message.into() }
}

fn to_document(map: &Map<String, Value>) -> Result<Document, Error> {
    mongodb::bson::to_document(map).map_err(|e| invalid(format!("payload cannot be stored: {e}")))
}

/// Check the typed fields a marathon payload may carry. Everything else is
/// schemaless and passes through untouched.
fn check_known_fields(map: &Map<String, Value>) -> Result<(), Error> {
    if map.contains_key("_id") {
        return Err(invalid("_id is assigned by the store and cannot be supplied"));
    }

    if let Some(value) = map.get("title") {
        let ok = value.as_str().is_some_and(|s| !s.trim().is_empty());
        if !ok {
            return Err(invalid("title must be a non-empty string"));
        }
    }

    for field in ["startRegistrationDate", "marathonStartDate"] {
        if let Some(value) = map.get(field) {
            let ok = value
                .as_str()
                .is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok());
            if !ok {
                return Err(invalid(format!("{field} must be an ISO date string (YYYY-MM-DD)")));
            }
        }
    }

    if let Some(value) = map.get("email") {
        let ok = value.as_str().is_some_and(|s| s.contains('@'));
        if !ok {
            return Err(invalid("email must be a string containing '@'"));
        }
    }

    if let Some(value) = map.get("totalRegistrationCount") {
        if value.as_u64().is_none() {
            return Err(invalid("totalRegistrationCount must be a non-negative integer"));
        }
    }

    Ok(())
}

/// Validate a marathon create payload and convert it to a storage document.
///
/// `title` is required; dates, email and the counter are checked when present.
pub fn validate_marathon_create(payload: &Value) -> Result<Document, Error> {
    let map = payload
        .as_object()
        .ok_or_else(|| invalid("request body must be a JSON object"))?;

    match map.get("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => {}
        _ => return Err(invalid("title is required and must be a non-empty string")),
    }
    check_known_fields(map)?;

    to_document(map)
}

/// Validate a marathon merge-patch payload.
///
/// Only supplied fields are checked. An empty patch is rejected up front
/// because the store rejects an empty `$set`.
pub fn validate_marathon_update(payload: &Value) -> Result<Document, Error> {
    let map = payload
        .as_object()
        .ok_or_else(|| invalid("request body must be a JSON object"))?;

    if map.is_empty() {
        return Err(invalid("update payload cannot be empty"));
    }
    check_known_fields(map)?;

    to_document(map)
}
