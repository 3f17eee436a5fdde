//! API request/response models.
//!
//! These types define the HTTP wire contract: query parameters, payload
//! validation for the schemaless create/update bodies, and the response
//! envelopes for mutations. Resource documents themselves stay untyped
//! (`bson::Document` rendered as plain JSON), so the models here validate the
//! known fields and pass the rest through.
//!
//! # Modules
//!
//! - [`auth`]: session acknowledgement and cookie-bearing responses
//! - [`common`]: insert/update/delete envelopes shared by the resources
//! - [`marathons`]: marathon list query and payload validation
//! - [`registrations`]: registration list query and payload validation

pub mod auth;
pub mod common;
pub mod marathons;
pub mod registrations;
