//! Session endpoints: token issuance, logout, and session introspection.
//!
//! `POST /jwt` signs whatever claims object the client posts and hands the
//! token back in an HTTP-only cookie. The API holds no session state; the
//! cookie is the session.

use crate::api::models::auth::{AuthAck, SessionCookieResponse};
use crate::auth::current_session::CurrentSession;
use crate::auth::session::{self, SessionClaims};
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

/// Issue a session token
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "auth",
    summary = "Issue a session token",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Session cookie set", body = AuthAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<SessionCookieResponse> {
    let claims = payload.as_object().cloned().ok_or_else(|| Error::Validation {
        message: "request body must be a JSON object".to_string(),
    })?;

    let token = session::create_session_token(claims, &state.config)?;
    let cookie = create_session_cookie(&token, &state.config);

    Ok(SessionCookieResponse { ack: AuthAck::new(), cookie })
}

/// Logout (clear session)
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    summary = "Clear the session cookie",
    responses(
        (status = 200, description = "Session cookie cleared", body = AuthAck),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<SessionCookieResponse> {
    let cookie = clear_session_cookie(&state.config);

    Ok(SessionCookieResponse { ack: AuthAck::new(), cookie })
}

/// Return the claims of the active session
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    summary = "Return the claims of the active session",
    responses(
        (status = 200, description = "Claims carried by the session token", body = serde_json::Value),
        (status = 401, description = "Missing or invalid session cookie"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn me(CurrentSession(session): CurrentSession) -> Result<Json<SessionClaims>> {
    Ok(Json(session))
}

fn same_site_attribute(value: &str) -> &'static str {
    match value {
        "strict" => "Strict",
        "none" => "None",
        _ => "Lax",
    }
}

/// Helper function to create a session cookie
fn create_session_cookie(token: &str, config: &Config) -> String {
    let session = &config.session;

    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}",
        session.cookie_name,
        token,
        same_site_attribute(&session.cookie_same_site),
        session.timeout.as_secs()
    );
    // Secure is a flag attribute: writing `Secure=false` would still enable it
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }

    cookie
}

/// Helper function to create an already-expired cookie that clears the session
fn clear_session_cookie(config: &Config) -> String {
    let session = &config.session;

    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0",
        session.cookie_name,
        same_site_attribute(&session.cookie_same_site)
    );
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }

    cookie
}
