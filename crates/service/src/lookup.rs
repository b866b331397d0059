use async_trait::async_trait;

/// Read-only view of the product catalog, as needed by carts.
/// Implementations must not mutate product data.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn product_exists(&self, id: &str) -> bool;
}
