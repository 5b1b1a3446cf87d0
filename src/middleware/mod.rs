//! HTTP middleware for Bistro Core
//!
//! Provides the bearer-token authentication extractor. The admin and
//! owner gates live next to the handlers in `api`, since both need the
//! request's path parameters or a store lookup.

pub mod auth;

pub use auth::{AuthError, AuthUser};
