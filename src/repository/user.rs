//! User repository

use crate::domain::User;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &User) -> Result<InsertOneResult>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn delete(&self, id: ObjectId) -> Result<DeleteResult>;
    /// Elevate the user's role to "admin"
    async fn grant_admin(&self, id: ObjectId) -> Result<UpdateResult>;
    async fn estimated_count(&self) -> Result<u64>;
}

pub struct UserRepositoryImpl {
    collection: Collection<User>,
}

impl UserRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(super::collections::USERS),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn insert(&self, user: &User) -> Result<InsertOneResult> {
        Ok(self.collection.insert_one(user).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteResult> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }

    async fn grant_admin(&self, id: ObjectId) -> Result<UpdateResult> {
        Ok(self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "role": "admin" } })
            .await?)
    }

    async fn estimated_count(&self) -> Result<u64> {
        Ok(self.collection.estimated_document_count().await?)
    }
}
