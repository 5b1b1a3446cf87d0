//! Persisted document models and request inputs
//!
//! Every persisted type maps 1:1 onto a document in one of the five
//! collections; the store generates `_id` on insert, so models carry it as
//! an `Option<ObjectId>` that is skipped during serialization when absent.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A dish on the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub recipe: String,
    pub image: String,
}

/// Mutable menu item fields, used for both creation and full-field replace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub recipe: String,
    pub image: String,
}

impl MenuItemInput {
    pub fn into_item(self) -> MenuItem {
        MenuItem {
            id: None,
            name: self.name,
            category: self.category,
            price: self.price,
            recipe: self.recipe,
            image: self.image,
        }
    }
}

/// A customer review; read-only surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub details: String,
    pub rating: f64,
}

/// A menu item placed in a user's cart, with a price snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub menu_id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
}

/// Add-to-cart request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub email: String,
    pub menu_id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
}

impl CartItemInput {
    pub fn into_item(self) -> CartItem {
        CartItem {
            id: None,
            email: self.email,
            menu_id: self.menu_id,
            name: self.name,
            image: self.image,
            price: self.price,
        }
    }
}

/// An application user. Email is the natural key; uniqueness is enforced
/// at the application level by an existence check before insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Role is binary-gated: "admin" or implicitly not
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Sign-in upsert request body
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
}

impl CreateUserRequest {
    pub fn into_user(self) -> User {
        User {
            id: None,
            email: self.email,
            name: self.name,
            role: None,
        }
    }
}

/// A completed payment. Never mutated after insert.
///
/// `cartIds` keeps the consumed cart document ids as the client sent them;
/// `menuIds` is stored as ObjectIds so the order-stats lookup joins against
/// `menu._id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub price: f64,
    pub cart_ids: Vec<String>,
    pub menu_ids: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Record-payment request body, as sent by the client after a successful
/// card charge
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub email: String,
    pub price: f64,
    pub cart_ids: Vec<String>,
    pub menu_ids: Vec<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}
