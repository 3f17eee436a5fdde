//! OpenAPI documentation configuration.
//!
//! The generated document is served at `/api-docs/openapi.json` and rendered
//! by RapiDoc at `/docs`.

use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::marathons::list_marathons,
        api::handlers::marathons::upcoming_marathons,
        api::handlers::marathons::get_marathon,
        api::handlers::marathons::create_marathon,
        api::handlers::marathons::update_marathon,
        api::handlers::marathons::delete_marathon,
        api::handlers::registrations::list_registrations,
        api::handlers::registrations::list_registrations_by_marathon,
        api::handlers::registrations::get_registration,
        api::handlers::registrations::create_registration,
        api::handlers::registrations::update_registration,
        api::handlers::registrations::delete_registration,
        api::handlers::tips::list_tips,
        api::handlers::auth::issue_token,
        api::handlers::auth::logout,
        api::handlers::auth::me,
    ),
    components(
        schemas(
            api::models::auth::AuthAck,
            api::models::common::InsertResponse,
            api::models::common::UpdateResponse,
            api::models::common::DeleteResponse,
        )
    ),
    tags(
        (name = "marathons", description = "Marathon events: CRUD plus a random sample of upcoming events for the landing page."),
        (name = "registrations", description = "Participant sign-ups. Creating one bumps the registration counter on its marathon."),
        (name = "tips", description = "Read-only training tip content."),
        (name = "auth", description = "Stateless cookie sessions. `POST /jwt` signs the posted claims object; `GET /me` echoes it back."),
    ),
    info(
        title = "Marathon Event API",
        description = "JSON API for marathon events, participant registrations, and training tips, backed by MongoDB.

Documents are schemaless: whatever the client stores comes back as-is, with `_id` rendered as a hex string.

## Sessions

`POST /jwt` issues a signed token in an HTTP-only `token` cookie. Only `GET /me` requires it."
    )
)]
pub struct ApiDoc;
