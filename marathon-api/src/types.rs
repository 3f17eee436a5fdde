//! Common type helpers shared across the API and store layers.
//!
//! This module defines:
//! - ObjectId parsing for path parameters, with validation errors instead of panics
//! - Wire rendering of BSON documents as plain JSON (ObjectIds as 24-char hex strings)
//!
//! # Wire Representation
//!
//! MongoDB hands back BSON documents. Serializing those directly would leak
//! extended-JSON wrappers like `{"$oid": "..."}` to clients, so [`document_to_json`]
//! flattens the types browsers actually consume: ObjectIds become their hex string,
//! dates become RFC 3339 strings, everything else maps to its natural JSON shape.

use crate::errors::Error;
use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde_json::Value as JsonValue;

/// Parse a path-parameter id into an ObjectId.
///
/// Malformed ids (anything but 24 hex chars) are a client error, not a server
/// fault, so this maps straight to a 400.
pub fn parse_object_id(id: &str, resource: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| Error::Validation {
        message: format!("invalid {resource} id: expected a 24 character hex string"),
    })
}

/// Render a single BSON value as wire JSON.
pub fn bson_to_json(value: Bson) -> JsonValue {
    match value {
        Bson::ObjectId(oid) => JsonValue::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(JsonValue::String)
            .unwrap_or(JsonValue::Null),
        Bson::Array(items) => JsonValue::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        other => other.into_relaxed_extjson(),
    }
}

/// Render a BSON document as wire JSON, recursively.
pub fn document_to_json(doc: Document) -> JsonValue {
    JsonValue::Object(doc.into_iter().map(|(key, value)| (key, bson_to_json(value))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn parse_object_id_accepts_hex() {
        let oid = parse_object_id("66b2f0a1c2d3e4f5a6b7c8d9", "marathon").unwrap();
        assert_eq!(oid.to_hex(), "66b2f0a1c2d3e4f5a6b7c8d9");
    }

    #[test]
    fn parse_object_id_rejects_garbage() {
        for bad in ["", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "66b2f0a1c2d3e4f5a6b7c8d9aa"] {
            let err = parse_object_id(bad, "marathon").unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "expected validation error for {bad:?}");
        }
    }

    #[test]
    fn document_renders_object_ids_as_hex_strings() {
        let oid = ObjectId::parse_str("66b2f0a1c2d3e4f5a6b7c8d9").unwrap();
        let doc = doc! {
            "_id": oid,
            "title": "City Marathon",
            "totalRegistrationCount": 42i64,
            "nested": { "ref": oid },
            "tags": ["road", "flat"],
        };

        let json = document_to_json(doc);

        assert_eq!(json["_id"], "66b2f0a1c2d3e4f5a6b7c8d9");
        assert_eq!(json["title"], "City Marathon");
        assert_eq!(json["totalRegistrationCount"], 42);
        assert_eq!(json["nested"]["ref"], "66b2f0a1c2d3e4f5a6b7c8d9");
        assert_eq!(json["tags"][0], "road");
    }
}
