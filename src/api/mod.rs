//! REST API shared utilities (response types, access gates)

pub mod auth;
pub mod cart;
pub mod health;
pub mod menu;
pub mod payment;
pub mod reviews;
pub mod stats;
pub mod user;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::repository::UserRepository;
use crate::server::AppState;
use mongodb::bson::oid::ObjectId;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};

/// Require the caller's user record to carry the "admin" role.
/// Returns Forbidden for an absent user or any other role.
pub(crate) async fn require_admin(state: &AppState, auth: &AuthUser) -> Result<()> {
    let user = state.users.find_by_email(&auth.email).await?;
    let is_admin = user.map(|u| u.is_admin()).unwrap_or(false);
    if is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("forbidden-access".to_string()))
    }
}

/// Require the caller's token identity to match the addressed email
pub(crate) fn require_self(auth: &AuthUser, email: &str) -> Result<()> {
    if auth.email == email {
        Ok(())
    } else {
        Err(AppError::Forbidden("access-forbidden".to_string()))
    }
}

/// Parse a path parameter as a document id
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid id: {}", raw)))
}

/// Insert outcome surfaced to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: Option<String>,
}

impl From<InsertOneResult> for InsertResponse {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
        }
    }
}

/// Update outcome surfaced to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

/// Delete outcome surfaced to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::AuthUser;

    fn auth(email: &str) -> AuthUser {
        AuthUser {
            email: email.to_string(),
        }
    }

    #[test]
    fn test_require_self_match() {
        assert!(require_self(&auth("diner@example.com"), "diner@example.com").is_ok());
    }

    #[test]
    fn test_require_self_mismatch() {
        let result = require_self(&auth("diner@example.com"), "other@example.com");
        match result {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "access-forbidden"),
            other => panic!("expected Forbidden, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_object_id_valid() {
        let id = parse_object_id("642c155b2c4774f05c36eeaa").unwrap();
        assert_eq!(id.to_hex(), "642c155b2c4774f05c36eeaa");
    }

    #[test]
    fn test_parse_object_id_invalid() {
        let result = parse_object_id("not-a-hex-id");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_insert_response_wire_shape() {
        let response = InsertResponse {
            acknowledged: true,
            inserted_id: Some("642c155b2c4774f05c36eeaa".to_string()),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"insertedId\":\"642c155b2c4774f05c36eeaa\""));
        assert!(json.contains("\"acknowledged\":true"));
    }

    #[test]
    fn test_update_response_wire_shape() {
        let response = UpdateResponse {
            matched_count: 1,
            modified_count: 1,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"matchedCount\":1"));
        assert!(json.contains("\"modifiedCount\":1"));
    }

    #[test]
    fn test_delete_response_wire_shape() {
        let response = DeleteResponse { deleted_count: 2 };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"deletedCount\":2"));
    }
}
