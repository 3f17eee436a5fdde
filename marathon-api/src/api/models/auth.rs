//! API request/response models for the session endpoints.

use crate::errors::Error;
use axum::{
    Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement body for session issue/clear operations.
///
/// `success` is always true; failures surface as error responses instead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthAck {
    pub success: bool,
}

impl AuthAck {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for AuthAck {
    fn default() -> Self {
        Self::new()
    }
}

/// Response that carries the session cookie alongside the ack body.
///
/// Used by both token issue (fresh cookie) and logout (expired cookie).
pub struct SessionCookieResponse {
    pub ack: AuthAck,
    pub cookie: String,
}

impl IntoResponse for SessionCookieResponse {
    fn into_response(self) -> Response {
        // cookie_name is validated at config load, but a header-invalid
        // cookie string must degrade to a 500, never a panic
        let cookie = match self.cookie.parse() {
            Ok(value) => value,
            Err(_) => {
                return Error::Internal {
                    operation: "render session cookie header".to_string(),
                }
                .into_response();
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::SET_COOKIE, cookie);

        (StatusCode::OK, headers, Json(self.ack)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_invalid_cookie_becomes_server_error() {
        let response = SessionCookieResponse {
            ack: AuthAck::new(),
            cookie: "token=bad\nvalue".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
