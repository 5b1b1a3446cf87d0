//! Payment API handlers

use crate::api::{parse_object_id, require_self, DeleteResponse, InsertResponse};
use crate::domain::{Payment, PaymentRequest};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::repository::{CartRepository, PaymentRepository};
use crate::server::AppState;
use crate::stripe::amount_in_cents;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

/// Outcome of recording a payment: the payment insert plus the cart cleanup
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub insert_result: InsertResponse,
    pub delete_result: DeleteResponse,
}

/// Create a card payment intent for the given price
pub async fn create_intent(
    State(state): State<AppState>,
    Json(body): Json<CreateIntentRequest>,
) -> Result<impl IntoResponse> {
    let amount = amount_in_cents(body.price);
    let intent = state.stripe_client.create_intent(amount, "usd").await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Record a completed payment, consume its cart items, and queue the
/// confirmation mail.
///
/// The two writes are not atomic. If the cart cleanup fails after the
/// payment insert, the payment id and the surviving cart ids are logged so
/// the inconsistency can be repaired.
pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<PaymentRequest>,
) -> Result<impl IntoResponse> {
    let cart_ids: Vec<ObjectId> = body
        .cart_ids
        .iter()
        .map(|raw| parse_object_id(raw))
        .collect::<Result<_>>()?;
    let menu_ids: Vec<ObjectId> = body
        .menu_ids
        .iter()
        .map(|raw| parse_object_id(raw))
        .collect::<Result<_>>()?;

    let payment = Payment {
        id: None,
        email: body.email,
        price: body.price,
        cart_ids: body.cart_ids,
        menu_ids,
        transaction_id: body.transaction_id,
        date: body.date,
    };

    let insert_result = state.payments.insert(&payment).await?;

    let delete_result = match state.carts.delete_many_by_ids(&cart_ids).await {
        Ok(result) => result,
        Err(err) => {
            error!(
                "payment {:?} recorded but cart items {:?} were not removed: {}",
                insert_result.inserted_id, payment.cart_ids, err
            );
            return Err(err);
        }
    };

    // Confirmation mail is fire-and-forget; the task outcome is only logged
    let email_service = state.email_service.clone();
    let to = payment.email.clone();
    let transaction_id = payment.transaction_id.clone();
    tokio::spawn(async move {
        email_service
            .send_order_confirmation(&to, transaction_id.as_deref())
            .await;
    });

    Ok(Json(PaymentReceipt {
        insert_result: InsertResponse::from(insert_result),
        delete_result: DeleteResponse::from(delete_result),
    }))
}

/// List payments for an email; callers may only list their own
pub async fn list_by_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    require_self(&auth, &email)?;

    let payments = state.payments.find_by_email(&email).await?;
    Ok(Json(payments))
}
