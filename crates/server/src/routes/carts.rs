use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Cart;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::AppState;

/// `POST /api/carts`
pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<Cart>), JsonApiError> {
    match state.carts.create().await {
        Ok(cart) => Ok((StatusCode::CREATED, Json(cart))),
        Err(e) => Err(JsonApiError::internal(&e)),
    }
}

/// `GET /api/carts/:cid`
pub async fn get_one(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Cart>, JsonApiError> {
    state
        .carts
        .get(&cid)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Cart not found"))
}

/// `POST /api/carts/:cid/product/:pid`
pub async fn add_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
) -> Result<Json<Cart>, JsonApiError> {
    state
        .carts
        .add_product(&cid, &pid)
        .await
        .map(Json)
        .map_err(|e| match e {
            // which of the two was missing goes in `detail`
            ServiceError::NotFound(which) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Cart or Product not found", Some(which))
            }
            _ => JsonApiError::internal(&e),
        })
}
