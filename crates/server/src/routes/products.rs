use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use models::{NewProduct, Product, ProductPatch};
use serde::Deserialize;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::AppState;

const PRODUCT_NOT_FOUND: &str = "Product not found";
const REQUIRED_FIELDS: &str = "All fields except thumbnails are required.";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// `GET /api/products?limit=N`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    let Query(q) = query.map_err(|r| JsonApiError::bad_request("Invalid query string", r.body_text()))?;
    Ok(Json(state.catalog.list(q.limit).await))
}

/// `GET /api/products/:pid`
pub async fn get_one(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Product>, JsonApiError> {
    state
        .catalog
        .get(&pid)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(PRODUCT_NOT_FOUND))
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let Json(input) = payload.map_err(|r| JsonApiError::bad_request("Invalid request body", r.body_text()))?;
    state
        .catalog
        .create(input)
        .await
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(|e| match e {
            ServiceError::Validation(m) => JsonApiError::bad_request(REQUIRED_FIELDS, m.to_string()),
            _ => JsonApiError::internal(&e),
        })
}

/// `PUT /api/products/:pid`
pub async fn update(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Json(patch) = payload.map_err(|r| JsonApiError::bad_request("Invalid request body", r.body_text()))?;
    state
        .catalog
        .update(&pid, patch)
        .await
        .map(Json)
        .map_err(|e| match e {
            ServiceError::NotFound(_) => JsonApiError::not_found(PRODUCT_NOT_FOUND),
            ServiceError::Validation(m) => JsonApiError::bad_request("Invalid product fields", m.to_string()),
            _ => JsonApiError::internal(&e),
        })
}

/// `DELETE /api/products/:pid`; 204 whether or not the product existed.
pub async fn remove(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    match state.catalog.delete(&pid).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(JsonApiError::internal(&e)),
    }
}
