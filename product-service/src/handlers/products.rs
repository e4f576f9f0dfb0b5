use crate::dtos::{
    DeleteProductResponse, InsertProductResponse, ListProductsParams, ListProductsResponse,
    ProductResponse, UpdateProductResponse,
};
use crate::error::AppError;
use crate::models::ProductFields;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;

/// Path ids must be 24-character hex ObjectIds; anything else is a 400.
fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid ID format")))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.store.list(params.priority.as_deref()).await?;
    tracing::info!(count = products.len(), "Listed products");

    let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(ListProductsResponse { status: true, data }))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(fields): Json<ProductFields>,
) -> Result<impl IntoResponse, AppError> {
    let inserted_id = state.store.insert(fields).await?;
    tracing::info!(product_id = %inserted_id, "Created product");

    Ok(Json(InsertProductResponse {
        acknowledged: true,
        inserted_id: inserted_id.to_hex(),
    }))
}

/// Returns the product, or a JSON `null` body when no product has that id.
pub async fn get_product_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let object_id = parse_object_id(&id)?;
    let product = state.store.find_by_id(object_id).await?;

    Ok(Json(product.map(ProductResponse::from)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let object_id = parse_object_id(&id)?;
    let deleted_count = state.store.delete_by_id(object_id).await?;
    tracing::info!(product_id = %id, deleted_count, "Deleted product");

    Ok(Json(DeleteProductResponse {
        acknowledged: true,
        deleted_count,
    }))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<ProductFields>,
) -> Result<impl IntoResponse, AppError> {
    let object_id = parse_object_id(&id)?;

    let outcome = state.store.update_fields(object_id, fields).await?;
    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Product not found")));
    }
    tracing::info!(product_id = %id, modified_count = outcome.modified_count, "Updated product");

    Ok(Json(UpdateProductResponse {
        status: true,
        result: outcome.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_accepts_24_char_hex() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_object_id_rejects_malformed_input() {
        for id in ["abc", "not-a-hex-string-at-all!", "", "123456789012345678901234xx"] {
            let err = parse_object_id(id).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }
}
