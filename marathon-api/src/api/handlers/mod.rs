//! HTTP request handlers for all API endpoints.
//!
//! Handlers validate the request, call into the database repositories, and
//! shape the response. Errors surface as [`crate::errors::Error`], which
//! converts to the right status code and JSON body on the way out.
//!
//! # Handler Modules
//!
//! - [`auth`]: Session token issuance, logout, and session introspection
//! - [`marathons`]: Marathon CRUD and the upcoming-marathons sample
//! - [`registrations`]: Registration CRUD and per-marathon listing
//! - [`tips`]: Read-only training tip content

pub mod auth;
pub mod marathons;
pub mod registrations;
pub mod tips;
