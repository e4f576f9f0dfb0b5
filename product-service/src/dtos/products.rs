use crate::models::Product;
use crate::services::UpdateOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: product.name,
            price: product.price,
            stock: product.stock,
            description: product.description,
            images: product.images,
            category: product.category,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    pub priority: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListProductsResponse {
    pub status: bool,
    pub data: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsertProductResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResultBody {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProductResponse {
    pub status: bool,
    pub result: UpdateResultBody,
}

impl From<UpdateOutcome> for UpdateResultBody {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
        }
    }
}
