//! Cart API handlers
//!
//! Cart listing filters by the owner email passed as a query parameter;
//! no ownership check is applied (see DESIGN.md).

use crate::api::{parse_object_id, DeleteResponse, InsertResponse};
use crate::domain::CartItemInput;
use crate::error::Result;
use crate::repository::CartRepository;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: String,
}

/// Add an item to a cart
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CartItemInput>,
) -> Result<impl IntoResponse> {
    let item = input.into_item();
    let result = state.carts.insert(&item).await?;
    Ok(Json(InsertResponse::from(result)))
}

/// List cart items for an email
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<impl IntoResponse> {
    let items = state.carts.find_by_email(&query.email).await?;
    Ok(Json(items))
}

/// Remove a single cart item
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_object_id(&id)?;
    let result = state.carts.delete(id).await?;
    Ok(Json(DeleteResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_input_deserialization() {
        let json = r#"{
            "email": "diner@example.com",
            "menuId": "642c155b2c4774f05c36eeaa",
            "name": "Fish Parmentier",
            "image": "https://cdn.example.com/fish.png",
            "price": 24.5
        }"#;

        let input: CartItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.menu_id, "642c155b2c4774f05c36eeaa");
        assert_eq!(input.price, 24.5);
    }

    #[test]
    fn test_cart_query_requires_email() {
        let result: std::result::Result<CartQuery, _> =
            serde_urlencoded::from_str::<CartQuery>("");
        assert!(result.is_err());

        let query: CartQuery = serde_urlencoded::from_str("email=diner%40example.com").unwrap();
        assert_eq!(query.email, "diner@example.com");
    }
}
