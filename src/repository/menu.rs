//! Menu repository

use crate::domain::{MenuItem, MenuItemInput};
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn insert(&self, item: &MenuItem) -> Result<InsertOneResult>;
    async fn find_all(&self) -> Result<Vec<MenuItem>>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<MenuItem>>;
    /// Replace the five mutable fields of an item, leaving `_id` untouched
    async fn replace_fields(&self, id: ObjectId, input: &MenuItemInput) -> Result<UpdateResult>;
    async fn delete(&self, id: ObjectId) -> Result<DeleteResult>;
    async fn estimated_count(&self) -> Result<u64>;
}

pub struct MenuRepositoryImpl {
    collection: Collection<MenuItem>,
}

impl MenuRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(super::collections::MENU),
        }
    }
}

#[async_trait]
impl MenuRepository for MenuRepositoryImpl {
    async fn insert(&self, item: &MenuItem) -> Result<InsertOneResult> {
        Ok(self.collection.insert_one(item).await?)
    }

    async fn find_all(&self) -> Result<Vec<MenuItem>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<MenuItem>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn replace_fields(&self, id: ObjectId, input: &MenuItemInput) -> Result<UpdateResult> {
        let update = doc! {
            "$set": {
                "name": input.name.clone(),
                "category": input.category.clone(),
                "price": input.price,
                "recipe": input.recipe.clone(),
                "image": input.image.clone(),
            }
        };
        Ok(self
            .collection
            .update_one(doc! { "_id": id }, update)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteResult> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }

    async fn estimated_count(&self) -> Result<u64> {
        Ok(self.collection.estimated_document_count().await?)
    }
}
