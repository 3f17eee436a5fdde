//! Registration list query parameters and payload validation.

use crate::db::handlers::registrations::RegistrationFilter;
use crate::errors::Error;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing registrations
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListRegistrationsQuery {
    /// Only registrations by this participant email (exact match)
    pub email: Option<String>,
    /// Case-insensitive substring match on the stored marathon title
    pub title: Option<String>,
}

impl ListRegistrationsQuery {
    pub fn into_filter(self) -> RegistrationFilter {
        RegistrationFilter::new()
            .with_email(self.email)
            .with_title(self.title)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation { message: message.into() }
}

fn to_document(map: &Map<String, Value>) -> Result<Document, Error> {
    mongodb::bson::to_document(map).map_err(|e| invalid(format!("payload cannot be stored: {e}")))
}

/// Typed-field checks shared by create and update. The rest of the payload
/// is schemaless.
fn check_known_fields(map: &Map<String, Value>) -> Result<(), Error> {
    if map.contains_key("_id") {
        return Err(invalid("_id is assigned by the store and cannot be supplied"));
    }

    if let Some(value) = map.get("marathon_id") {
        let ok = value.as_str().is_some_and(|s| !s.trim().is_empty());
        if !ok {
            return Err(invalid("marathon_id must be a non-empty string"));
        }
    }

    if let Some(value) = map.get("email") {
        let ok = value.as_str().is_some_and(|s| s.contains('@'));
        if !ok {
            return Err(invalid("email must be a string containing '@'"));
        }
    }

    Ok(())
}

/// Validate a registration create payload and convert it to a storage
/// document.
///
/// `marathon_id` is required but its format is deliberately not checked;
/// whether it resolves to a marathon only matters for the counter update,
/// which the handler reports on separately.
pub fn validate_registration_create(payload: &Value) -> Result<Document, Error> {
    let map = payload
        .as_object()
        .ok_or_else(|| invalid("request body must be a JSON object"))?;

    match map.get("marathon_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => {}
        _ => return Err(invalid("marathon_id is required and must be a non-empty string")),
    }
    check_known_fields(map)?;

    to_document(map)
}

/// Validate a registration merge-patch payload.
pub fn validate_registration_update(payload: &Value) -> Result<Document, Error> {
    let map = payload
        .as_object()
        .ok_or_else(|| invalid("request body must be a JSON object"))?;

    if map.is_empty() {
        return Err(invalid("update payload cannot be empty"));
    }
    check_known_fields(map)?;

    to_document(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_maps_to_filter() {
        let query = ListRegistrationsQuery {
            email: Some("runner@example.com".to_string()),
            title: Some("city".to_string()),
        };
        let filter = query.into_filter();
        assert_eq!(filter.email.as_deref(), Some("runner@example.com"));
        assert_eq!(filter.title.as_deref(), Some("city"));
    }

    #[test]
    fn create_requires_marathon_id() {
        for payload in [
            json!({}),
            json!({ "marathon_id": "" }),
            json!({ "marathon_id": "  " }),
            json!({ "marathon_id": 42 }),
            json!({ "email": "runner@example.com" }),
        ] {
            assert!(validate_registration_create(&payload).is_err(), "expected reject for {payload}");
        }
    }

    #[test]
    fn create_does_not_check_marathon_id_format() {
        let payload = json!({ "marathon_id": "not-a-hex-id" });
        assert!(validate_registration_create(&payload).is_ok());
    }

    #[test]
    fn create_passes_unknown_fields_through() {
        let payload = json!({
            "marathon_id": "66b2f0a1c2d3e4f5a6b7c8d9",
            "email": "runner@example.com",
            "title": "City Marathon",
            "shirt_size": "M",
        });

        let document = validate_registration_create(&payload).unwrap();
        assert_eq!(document.get_str("marathon_id").unwrap(), "66b2f0a1c2d3e4f5a6b7c8d9");
        assert_eq!(document.get_str("shirt_size").unwrap(), "M");
    }

    #[test]
    fn create_rejects_client_supplied_id_and_bad_email() {
        let payload = json!({ "marathon_id": "abc", "_id": "66b2f0a1c2d3e4f5a6b7c8d9" });
        assert!(validate_registration_create(&payload).is_err());

        let payload = json!({ "marathon_id": "abc", "email": "not-an-email" });
        assert!(validate_registration_create(&payload).is_err());
    }

    #[test]
    fn update_rejects_empty_patch_and_checks_supplied_fields() {
        assert!(validate_registration_update(&json!({})).is_err());
        assert!(validate_registration_update(&json!({ "marathon_id": "" })).is_err());
        assert!(validate_registration_update(&json!({ "email": "nope" })).is_err());

        let document = validate_registration_update(&json!({ "shirt_size": "L" })).unwrap();
        assert_eq!(document.get_str("shirt_size").unwrap(), "L");
    }
}
