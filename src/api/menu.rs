//! Menu API handlers
//!
//! Creation is admin-gated; the PATCH and DELETE routes are deliberately
//! open to match the deployed API surface (see DESIGN.md).

use crate::api::{parse_object_id, require_admin, DeleteResponse, InsertResponse, UpdateResponse};
use crate::domain::MenuItemInput;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::repository::MenuRepository;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Add a menu item (admin only)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<MenuItemInput>,
) -> Result<impl IntoResponse> {
    require_admin(&state, &auth).await?;

    let item = input.into_item();
    let result = state.menu.insert(&item).await?;
    Ok(Json(InsertResponse::from(result)))
}

/// List all menu items
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.menu.find_all().await?;
    Ok(Json(items))
}

/// Get a single menu item; absent items answer 200 with null
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_object_id(&id)?;
    let item = state.menu.find_by_id(id).await?;
    Ok(Json(item))
}

/// Replace the mutable fields of a menu item
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<MenuItemInput>,
) -> Result<impl IntoResponse> {
    let id = parse_object_id(&id)?;
    let result = state.menu.replace_fields(id, &input).await?;
    Ok(Json(UpdateResponse::from(result)))
}

/// Delete a menu item
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_object_id(&id)?;
    let result = state.menu.delete(id).await?;
    Ok(Json(DeleteResponse::from(result)))
}
