use std::sync::Arc;

use axum::{routing::{get, post}, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::file::{CartService, ProductCatalog};
use service::runtime::Services;

pub mod carts;
pub mod products;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalog>,
    pub carts: Arc<CartService>,
}

impl From<Services> for AppState {
    fn from(s: Services) -> Self {
        Self { catalog: s.catalog, carts: s.carts }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health, products and carts.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let products = Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/:pid",
            get(products::get_one).put(products::update).delete(products::remove),
        );

    let carts = Router::new()
        .route("/", post(carts::create))
        .route("/:cid", get(carts::get_one))
        .route("/:cid/product/:pid", post(carts::add_product));

    Router::new()
        .route("/health", get(health))
        .nest("/api/products", products)
        .nest("/api/carts", carts)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // one INFO span per request with method and path
                        .make_span_with(
                            DefaultMakeSpan::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        // status code and latency
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
