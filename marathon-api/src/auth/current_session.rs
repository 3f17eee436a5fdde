//! Extractor for the verified session attached to a request.

use crate::{
    AppState,
    auth::session::{self, SessionClaims},
    config::Config,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

/// The verified claims of the caller's session cookie.
///
/// Usable as an extractor by any handler; requests without a valid session
/// cookie are rejected with 401 before the handler body runs.
#[derive(Debug)]
pub struct CurrentSession(pub SessionClaims);

/// Extract the session from the configured cookie if present.
/// Returns:
/// - None: no session cookie present
/// - Some(Ok(claims)): valid token found and verified
/// - Some(Err(error)): token cookie present but invalid/expired
///
/// Unlike a missing cookie, a present-but-bad token propagates the
/// verification error so the caller sees the "invalid token" reject rather
/// than the generic "unauthorized" one.
#[instrument(skip(parts, config))]
fn try_cookie_session(parts: &Parts, config: &Config) -> Option<Result<SessionClaims>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::Validation {
                message: format!("invalid cookie header: {e}"),
            }));
        }
    };
    let cookie_name = &config.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                return Some(session::verify_session_token(value, config));
            }
        }
    }
    None
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_cookie_session(parts, &state.config) {
            Some(Ok(claims)) => Ok(CurrentSession(claims)),
            Some(Err(error)) => Err(error),
            None => Err(Error::Unauthenticated { message: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, header};
    use serde_json::json;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.session.secret = "extractor-test-secret".to_string();
        config
    }

    fn parts_with_cookie(cookie: &str) -> Parts {
        let (parts, _body) = Request::builder()
            .header(header::COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn no_cookie_header_yields_none() {
        let (parts, _body) = Request::builder().body(()).unwrap().into_parts();
        assert!(try_cookie_session(&parts, &test_config()).is_none());
    }

    #[test]
    fn unrelated_cookies_yield_none() {
        let parts = parts_with_cookie("theme=dark; lang=en");
        assert!(try_cookie_session(&parts, &test_config()).is_none());
    }

    #[test]
    fn valid_token_cookie_verifies() {
        let config = test_config();
        let mut payload = serde_json::Map::new();
        payload.insert("email".to_string(), json!("runner@example.com"));
        let token = session::create_session_token(payload, &config).unwrap();

        let parts = parts_with_cookie(&format!("theme=dark; token={token}"));
        let claims = try_cookie_session(&parts, &config).unwrap().unwrap();
        assert_eq!(claims.claims.get("email"), Some(&json!("runner@example.com")));
    }

    #[test]
    fn tampered_token_cookie_is_rejected_not_skipped() {
        let config = test_config();
        let parts = parts_with_cookie("token=not-a-real-token");

        let result = try_cookie_session(&parts, &config).unwrap();
        assert!(matches!(
            result.unwrap_err(),
            Error::Unauthenticated { message: Some(ref m) } if m == "invalid token"
        ));
    }
}
