//! User API handlers

use crate::api::{parse_object_id, require_admin, require_self, DeleteResponse, UpdateResponse};
use crate::domain::CreateUserRequest;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::repository::UserRepository;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Insert outcome for the idempotent sign-in upsert
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsertResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub inserted_id: Option<String>,
}

/// Admin flag for a single user
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// Create a user on first sign-in; idempotent by email
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    input.validate()?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Ok(Json(UserInsertResponse {
            message: Some("User already exists".to_string()),
            inserted_id: None,
        }));
    }

    let user = input.into_user();
    let result = state.users.insert(&user).await?;
    Ok(Json(UserInsertResponse {
        message: None,
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
    }))
}

/// List all users (admin only)
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    require_admin(&state, &auth).await?;

    let users = state.users.find_all().await?;
    Ok(Json(users))
}

/// Delete a user (admin only)
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    require_admin(&state, &auth).await?;

    let id = parse_object_id(&id)?;
    let result = state.users.delete(id).await?;
    Ok(Json(DeleteResponse::from(result)))
}

/// Elevate a user to admin (admin only)
pub async fn grant_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    require_admin(&state, &auth).await?;

    let id = parse_object_id(&id)?;
    let result = state.users.grant_admin(id).await?;
    Ok(Json(UpdateResponse::from(result)))
}

/// Report whether the addressed user is an admin. Callers may only ask
/// about themselves; an absent user reads as not-admin.
pub async fn admin_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    require_self(&auth, &email)?;

    let user = state.users.find_by_email(&email).await?;
    let admin = user.map(|u| u.is_admin()).unwrap_or(false);
    Ok(Json(AdminStatusResponse { admin }))
}
