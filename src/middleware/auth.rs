//! JWT authentication extractor
//!
//! `AuthUser` rejects with 401 before the handler body runs, so a missing
//! or invalid token always wins over any role or ownership check.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::server::AppState;

/// Authenticated caller identity extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Email address from the token claims
    pub email: String,
}

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader,
    /// Token validation failed
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // One generic body for every failure mode; no detail leaked
        let body = serde_json::json!({ "message": "access-unauthorized" });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Extract and validate Bearer token from Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidHeader)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state
            .jwt_manager
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser {
            email: claims.email,
        })
    }
}
