//! Payment repository and statistics pipelines

use crate::domain::Payment;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, from_document, Bson, Document};
use mongodb::results::InsertOneResult;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// One grouped row of the order-stats pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStat {
    pub category: String,
    pub quantity: i64,
    pub revenue: f64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: &Payment) -> Result<InsertOneResult>;
    async fn find_by_email(&self, email: &str) -> Result<Vec<Payment>>;
    async fn estimated_count(&self) -> Result<u64>;
    /// Sum of `price` across all payments; 0 for an empty collection
    async fn total_revenue(&self) -> Result<f64>;
    /// Per-category quantity and revenue of purchased menu items
    async fn order_stats(&self) -> Result<Vec<OrderStat>>;
}

pub struct PaymentRepositoryImpl {
    collection: Collection<Payment>,
}

impl PaymentRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(super::collections::PAYMENTS),
        }
    }
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    async fn insert(&self, payment: &Payment) -> Result<InsertOneResult> {
        Ok(self.collection.insert_one(payment).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Payment>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn estimated_count(&self) -> Result<u64> {
        Ok(self.collection.estimated_document_count().await?)
    }

    async fn total_revenue(&self) -> Result<f64> {
        let mut cursor = self.collection.aggregate(revenue_pipeline()).await?;
        let total = match cursor.try_next().await? {
            Some(row) => row.get("totalRevenue").map(bson_to_f64).unwrap_or(0.0),
            None => 0.0,
        };
        Ok(total)
    }

    async fn order_stats(&self) -> Result<Vec<OrderStat>> {
        let mut cursor = self.collection.aggregate(order_stats_pipeline()).await?;
        let mut stats = Vec::new();
        while let Some(row) = cursor.try_next().await? {
            stats.push(
                from_document(row)
                    .map_err(|e| crate::error::AppError::Internal(e.into()))?,
            );
        }
        Ok(stats)
    }
}

/// Grand-total revenue over the whole collection
pub(crate) fn revenue_pipeline() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": null,
            "totalRevenue": { "$sum": "$price" }
        }
    }]
}

/// Per-category sales: unwind each payment's menu ids, join them back to
/// the menu collection, then group by the joined item's category
pub(crate) fn order_stats_pipeline() -> Vec<Document> {
    vec![
        doc! { "$unwind": "$menuIds" },
        doc! {
            "$lookup": {
                "from": super::collections::MENU,
                "localField": "menuIds",
                "foreignField": "_id",
                "as": "menuItems"
            }
        },
        doc! { "$unwind": "$menuItems" },
        doc! {
            "$group": {
                "_id": "$menuItems.category",
                "quantity": { "$sum": 1 },
                "revenue": { "$sum": "$menuItems.price" }
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "category": "$_id",
                "quantity": "$quantity",
                "revenue": "$revenue"
            }
        },
    ]
}

/// Aggregation sums come back as whichever numeric BSON type the server
/// picked; normalize to f64
fn bson_to_f64(value: &Bson) -> f64 {
    match value {
        Bson::Double(v) => *v,
        Bson::Int32(v) => f64::from(*v),
        Bson::Int64(v) => *v as f64,
        _ => 0.0,
    }
}
