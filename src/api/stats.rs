//! Statistics API handlers

use crate::api::{require_admin, require_self};
use crate::domain::Payment;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::repository::{MenuRepository, PaymentRepository, UserRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Per-user purchase summary
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_paid: f64,
    pub total_orders: usize,
    pub total_transactions: usize,
    pub menu_items: u64,
}

/// Storefront-wide summary
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: u64,
    pub menu_items: u64,
    pub orders: u64,
    pub revenue: f64,
}

/// Summarize a user's payment history
fn summarize(payments: &[Payment], menu_items: u64) -> UserStats {
    UserStats {
        total_paid: payments.iter().map(|p| p.price).sum(),
        total_orders: payments.iter().map(|p| p.cart_ids.len()).sum(),
        total_transactions: payments
            .iter()
            .filter(|p| p.transaction_id.is_some())
            .count(),
        menu_items,
    }
}

/// Round to two decimals, the way revenue is displayed
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Purchase summary for one user; callers may only ask about themselves
pub async fn user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    require_self(&auth, &email)?;

    let payments = state.payments.find_by_email(&email).await?;
    let menu_items = state.menu.estimated_count().await?;

    Ok(Json(summarize(&payments, menu_items)))
}

/// Storefront-wide counts and revenue
pub async fn admin_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<impl IntoResponse> {
    let users = state.users.estimated_count().await?;
    let menu_items = state.menu.estimated_count().await?;
    let orders = state.payments.estimated_count().await?;
    let revenue = round2(state.payments.total_revenue().await?);

    Ok(Json(AdminStats {
        users,
        menu_items,
        orders,
        revenue,
    }))
}

/// Per-category sales breakdown (admin only)
pub async fn order_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    require_admin(&state, &auth).await?;

    let stats = state.payments.order_stats().await?;
    Ok(Json(stats))
}
