//! # marathon-api: Marathon Event API
//!
//! `marathon-api` is a JSON HTTP API for marathon events, participant
//! registrations, and training tips, backed by MongoDB. It serves a running
//! event platform's frontend: organizers create and manage marathons, runners
//! register for them, and the landing page shows a random sample of upcoming
//! events.
//!
//! ## Overview
//!
//! Documents are schemaless by design. Beyond a handful of fields the API
//! itself relies on (`title`, the date fields, `email`, `marathon_id`,
//! `totalRegistrationCount`), payloads are stored and returned as-is, with
//! `_id` rendered as a 24 character hex string. Creating a registration has
//! one side effect: it increments `totalRegistrationCount` on the referenced
//! marathon.
//!
//! Sessions are stateless. `POST /jwt` signs whatever claims object the
//! client posts and sets it as an HTTP-only cookie; `GET /me` verifies the
//! cookie and echoes the claims back. No session store exists on the server.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and MongoDB for persistence. A request flows through the
//! tracing and CORS layers into a handler, which validates the payload
//! ([`api::models`]), calls a repository ([`db::handlers`]) for the actual
//! collection operation, and shapes the response. Errors surface as
//! [`errors::Error`] and convert to JSON error bodies with the right status
//! code.
//!
//! API documentation is generated with `utoipa` and served by RapiDoc at
//! `/docs`.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

pub use config::Config;

use crate::auth::middleware::session_auth_middleware;
use crate::config::CorsOrigin;
use crate::db::Database;
use crate::openapi::ApiDoc;
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, Level};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: MongoDB client plus the configured database name
/// - `config`: Application configuration loaded from file/environment
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(max_age);
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// `/me` is the only gated route; everything else is public. The session
/// middleware sits on the route itself so the reject fires before the handler
/// runs.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let session_gate = from_fn_with_state(state.clone(), session_auth_middleware);

    let router = Router::new()
        .route("/", get(|| async { "Marathon Event API is running..." }))
        // Marathons
        .route("/marathons", get(api::handlers::marathons::list_marathons))
        .route("/marathons", post(api::handlers::marathons::create_marathon))
        .route("/upcoming-marathons", get(api::handlers::marathons::upcoming_marathons))
        .route("/marathons/{id}", get(api::handlers::marathons::get_marathon))
        .route("/marathons/{id}", patch(api::handlers::marathons::update_marathon))
        .route("/marathons/{id}", delete(api::handlers::marathons::delete_marathon))
        // Registrations
        .route("/registrations", get(api::handlers::registrations::list_registrations))
        .route("/registrations", post(api::handlers::registrations::create_registration))
        .route(
            "/registrations/marathons/{marathon_id}",
            get(api::handlers::registrations::list_registrations_by_marathon),
        )
        .route("/registrations/{id}", get(api::handlers::registrations::get_registration))
        .route("/registrations/{id}", patch(api::handlers::registrations::update_registration))
        .route("/registrations/{id}", delete(api::handlers::registrations::delete_registration))
        // Tips
        .route("/marathonTips", get(api::handlers::tips::list_tips))
        // Sessions
        .route("/jwt", post(api::handlers::auth::issue_token))
        .route("/logout", post(api::handlers::auth::logout))
        .route("/me", get(api::handlers::auth::me).route_layer(session_gate))
        .with_state(state.clone())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/docs"));

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer);

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled application: a configured router and the address to serve
/// it on.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to MongoDB (failing fast if
///    the store is unreachable) and builds the router
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting marathon-api with configuration: {:#?}", config);

        // Telemetry is up by now, so non-fatal config findings reach the log
        for warning in config.validation_warnings() {
            tracing::warn!("{warning}");
        }

        let db = Database::connect(&config.database).await?;

        let state = AppState { db, config: config.clone() };
        let router = build_router(state)?;

        Ok(Self { router, config })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Marathon Event API listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    // Router construction needs no live store; queries are lazy until a
    // request actually touches a collection.
    async fn test_server() -> TestServer {
        let config = Config::default();
        let db = Database::build(&config.database).await.unwrap();
        let router = build_router(AppState { db, config }).unwrap();

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_liveness_banner() {
        let server = test_server().await;

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("Marathon Event API is running...");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = test_server().await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc: serde_json::Value = response.json();
        assert_eq!(doc["info"]["title"], "Marathon Event API");
    }

    #[tokio::test]
    async fn test_docs_ui_is_served() {
        let server = test_server().await;

        let response = server.get("/docs").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_me_is_gated() {
        let server = test_server().await;

        let response = server.get("/me").await;

        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "unauthorized");
    }

    #[test]
    fn test_cors_layer_accepts_default_origins() {
        let config = Config::default();
        assert!(create_cors_layer(&config).is_ok());
    }
}
