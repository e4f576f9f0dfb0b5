use crate::error::AppError;
use crate::models::{Product, ProductFields, UPDATABLE_FIELDS};
use crate::services::database::ProductDb;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::options::UpdateOptions;
use tokio::sync::RwLock;

/// Counts reported back from an update, mirroring the driver's result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Persistence seam for product records. Handlers only see this trait, so an
/// in-memory double can stand in for MongoDB under test.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, optionally filtered on a `priority` document key.
    async fn list(&self, priority: Option<&str>) -> Result<Vec<Product>, AppError>;
    /// Insert a new product and return its assigned id.
    async fn insert(&self, fields: ProductFields) -> Result<ObjectId, AppError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError>;
    /// Delete at most one product; returns how many documents went away.
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError>;
    /// Overwrite the six writable fields of a product. Fields absent from
    /// `fields` are cleared on the stored record. Never inserts.
    async fn update_fields(
        &self,
        id: ObjectId,
        fields: ProductFields,
    ) -> Result<UpdateOutcome, AppError>;
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Build the update document for `update_fields`: `$set` for the fields the
/// body carries, `$unset` for the writable fields it omits. MongoDB rejects
/// empty operator documents, so each clause is only added when non-empty.
fn build_update(fields: &ProductFields) -> Result<Document, AppError> {
    let present = bson::to_document(fields)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e.to_string())))?;

    let mut unset = Document::new();
    for field in UPDATABLE_FIELDS {
        if !present.contains_key(field) {
            unset.insert(field, "");
        }
    }

    let mut update = Document::new();
    if !present.is_empty() {
        update.insert("$set", present);
    }
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    Ok(update)
}

pub struct MongoProductStore {
    db: ProductDb,
}

impl MongoProductStore {
    pub fn new(db: ProductDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn list(&self, priority: Option<&str>) -> Result<Vec<Product>, AppError> {
        let filter = match priority {
            Some(priority) => doc! { "priority": priority },
            None => doc! {},
        };

        let cursor = self.db.products().find(filter, None).await.map_err(|e| {
            tracing::error!("Failed to query products: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        let products: Vec<Product> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect products: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(products)
    }

    async fn insert(&self, fields: ProductFields) -> Result<ObjectId, AppError> {
        let mut product = Product::new(fields);
        let id = ObjectId::new();
        product.id = Some(id);

        self.db
            .products()
            .insert_one(&product, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert product: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError> {
        self.db
            .products()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find product: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .db
            .products()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(result.deleted_count)
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: ProductFields,
    ) -> Result<UpdateOutcome, AppError> {
        let update = build_update(&fields)?;
        let options = UpdateOptions::builder().upsert(false).build();

        let result = self
            .db
            .products()
            .update_one(doc! { "_id": id }, update, options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update product: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.db.health_check().await
    }
}

/// In-memory store used by integration tests in place of a live MongoDB.
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self, priority: Option<&str>) -> Result<Vec<Product>, AppError> {
        // Stored products never carry a `priority` key, so any priority
        // filter matches nothing, same as it would against the collection.
        if priority.is_some() {
            return Ok(Vec::new());
        }
        Ok(self.products.read().await.clone())
    }

    async fn insert(&self, fields: ProductFields) -> Result<ObjectId, AppError> {
        let mut product = Product::new(fields);
        let id = ObjectId::new();
        product.id = Some(id);
        self.products.write().await.push(product);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != Some(id));
        Ok((before - products.len()) as u64)
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: ProductFields,
    ) -> Result<UpdateOutcome, AppError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == Some(id)) {
            Some(product) => {
                let before = product.clone();
                fields.apply(product);
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: u64::from(*product != before),
                })
            }
            None => Ok(UpdateOutcome {
                matched_count: 0,
                modified_count: 0,
            }),
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store double whose every operation fails, for exercising error paths in
/// tests.
pub struct FailingProductStore;

impl FailingProductStore {
    fn offline() -> AppError {
        AppError::DatabaseError(anyhow::anyhow!("connection lost"))
    }
}

#[async_trait]
impl ProductStore for FailingProductStore {
    async fn list(&self, _priority: Option<&str>) -> Result<Vec<Product>, AppError> {
        Err(Self::offline())
    }

    async fn insert(&self, _fields: ProductFields) -> Result<ObjectId, AppError> {
        Err(Self::offline())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Product>, AppError> {
        Err(Self::offline())
    }

    async fn delete_by_id(&self, _id: ObjectId) -> Result<u64, AppError> {
        Err(Self::offline())
    }

    async fn update_fields(
        &self,
        _id: ObjectId,
        _fields: ProductFields,
    ) -> Result<UpdateOutcome, AppError> {
        Err(Self::offline())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(Self::offline())
    }
}
