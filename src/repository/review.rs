//! Review repository

use crate::domain::Review;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Review>>;
}

pub struct ReviewRepositoryImpl {
    collection: Collection<Review>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(super::collections::REVIEWS),
        }
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<Review>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }
}
