use std::{path::PathBuf, sync::Arc};

use models::{ids, Cart};
use tracing::info;

use crate::errors::ServiceError;
use crate::lookup::ProductLookup;
use crate::storage::{CollectionStore, WriteMode};

/// Shopping carts persisted as a JSON collection. Holds a read-only handle on
/// the product catalog to check that added products exist.
pub struct CartService {
    store: Arc<CollectionStore<Cart>>,
    products: Arc<dyn ProductLookup>,
}

impl CartService {
    pub fn new(store: Arc<CollectionStore<Cart>>, products: Arc<dyn ProductLookup>) -> Self {
        Self { store, products }
    }

    pub async fn open<P: Into<PathBuf>>(
        path: P,
        write_mode: WriteMode,
        products: Arc<dyn ProductLookup>,
    ) -> Result<Arc<Self>, ServiceError> {
        let store = CollectionStore::open("carts", path, write_mode).await?;
        Ok(Arc::new(Self::new(store, products)))
    }

    /// Create and persist an empty cart.
    pub async fn create(&self) -> Result<Cart, ServiceError> {
        let cart = Cart::new(ids::next_id());
        let created = cart.clone();
        self.store
            .apply(move |carts| {
                carts.push(cart);
                Ok(())
            })
            .await?;
        info!(cart_id = %created.id, "cart created");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Option<Cart> {
        self.store.load().await.into_iter().find(|c| c.id == id)
    }

    /// Add one unit of `product_id` to the cart.
    ///
    /// Fails with `NotFound` naming the cart when the cart is missing, else
    /// naming the product when the product is missing. Only the cart
    /// collection is written; product stock is not touched.
    pub async fn add_product(&self, cart_id: &str, product_id: &str) -> Result<Cart, ServiceError> {
        let product_exists = self.products.product_exists(product_id).await;
        let cart = self
            .store
            .apply(|carts| {
                let cart = carts
                    .iter_mut()
                    .find(|c| c.id == cart_id)
                    .ok_or_else(|| ServiceError::not_found("cart"))?;
                if !product_exists {
                    return Err(ServiceError::not_found("product"));
                }
                cart.add_product(product_id);
                Ok(cart.clone())
            })
            .await?;
        info!(
            cart_id = %cart.id,
            product_id = %product_id,
            quantity = cart.quantity_of(product_id),
            "product added to cart"
        );
        Ok(cart)
    }
}
