//! Cart repository

use crate::domain::CartItem;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn insert(&self, item: &CartItem) -> Result<InsertOneResult>;
    async fn find_by_email(&self, email: &str) -> Result<Vec<CartItem>>;
    async fn delete(&self, id: ObjectId) -> Result<DeleteResult>;
    /// Bulk removal of the cart items consumed by a payment
    async fn delete_many_by_ids(&self, ids: &[ObjectId]) -> Result<DeleteResult>;
}

pub struct CartRepositoryImpl {
    collection: Collection<CartItem>,
}

impl CartRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(super::collections::CARTS),
        }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryImpl {
    async fn insert(&self, item: &CartItem) -> Result<InsertOneResult> {
        Ok(self.collection.insert_one(item).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<CartItem>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteResult> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }

    async fn delete_many_by_ids(&self, ids: &[ObjectId]) -> Result<DeleteResult> {
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        Ok(self.collection.delete_many(filter).await?)
    }
}
