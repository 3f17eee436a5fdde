//! Session token issuing and verification.
//!
//! This module provides the cookie-based auth gate:
//! - Signed JWT session tokens carrying arbitrary caller-supplied claims
//! - An extractor ([`current_session::CurrentSession`]) for handlers that need
//!   the verified claims
//! - Route protection middleware for declaring gated routes in the route table
//!
//! # Session Model
//!
//! Sessions are stateless: `POST /jwt` signs the caller's claims with the
//! server secret and hands the token back in an HTTP-only cookie, and
//! verification is purely by signature. The server keeps no session table, so
//! logout only clears the client's cookie; a captured token stays valid until
//! its natural expiry.
//!
//! # Reject Reasons
//!
//! A missing cookie rejects with `"unauthorized"`; a cookie that is present
//! but fails verification rejects with `"invalid token"`. Both are 401s.
//!
//! # Modules
//!
//! - [`current_session`]: Extractor for the verified session claims
//! - [`middleware`]: Route protection middleware
//! - [`session`]: Token creation and verification

pub mod current_session;
pub mod middleware;
pub mod session;
