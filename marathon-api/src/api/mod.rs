//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures and payload validation
//!
//! # API Structure
//!
//! The API is divided into a few functional areas:
//!
//! - **Marathons** (`/marathons/*`, `/upcoming-marathons`): Event CRUD and discovery
//! - **Registrations** (`/registrations/*`): Participant sign-ups per event
//! - **Tips** (`/marathonTips`): Static training tip content
//! - **Sessions** (`/jwt`, `/logout`, `/me`): Cookie-based session management
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/docs` when the server is running.

pub mod handlers;
pub mod models;
