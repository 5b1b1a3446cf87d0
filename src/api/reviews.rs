//! Review API handlers

use crate::error::Result;
use crate::repository::ReviewRepository;
use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// List all reviews
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let reviews = state.reviews.find_all().await?;
    Ok(Json(reviews))
}
