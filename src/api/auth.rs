//! Token issuance
//!
//! POST /jwt signs whatever identity the caller supplies; real
//! authentication must happen upstream of this endpoint.

use crate::error::Result;
use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a bearer token for the supplied identity
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<impl IntoResponse> {
    let token = state.jwt_manager.issue(&body.email)?;
    Ok(Json(TokenResponse { token }))
}
