use std::{path::PathBuf, sync::Arc};

use models::{ids, NewProduct, Product, ProductPatch};
use tracing::info;

use crate::errors::ServiceError;
use crate::lookup::ProductLookup;
use crate::pagination::ListLimit;
use crate::storage::{CollectionStore, WriteMode};

/// Product catalog persisted as a JSON collection.
pub struct ProductCatalog {
    store: Arc<CollectionStore<Product>>,
    max_list_limit: Option<usize>,
}

impl ProductCatalog {
    pub fn new(store: Arc<CollectionStore<Product>>) -> Self {
        Self { store, max_list_limit: None }
    }

    /// Open the catalog file at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P, write_mode: WriteMode) -> Result<Arc<Self>, ServiceError> {
        let store = CollectionStore::open("products", path, write_mode).await?;
        Ok(Arc::new(Self::new(store)))
    }

    /// Cap every `list` result at `cap` records.
    pub fn with_max_list_limit(mut self, cap: Option<usize>) -> Self {
        self.max_list_limit = cap;
        self
    }

    /// Products in stored order, truncated to `limit` when given.
    pub async fn list(&self, limit: Option<usize>) -> Vec<Product> {
        let limit = ListLimit { requested: limit, cap: self.max_list_limit };
        limit.apply(self.store.load().await)
    }

    pub async fn get(&self, id: &str) -> Option<Product> {
        self.store.load().await.into_iter().find(|p| p.id == id)
    }

    /// Validate and append a new product.
    pub async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let product = input.into_product(ids::next_id())?;
        let created = product.clone();
        self.store
            .apply(move |products| {
                products.push(product);
                Ok(())
            })
            .await?;
        info!(product_id = %created.id, code = %created.code, "product created");
        Ok(created)
    }

    /// Merge `patch` over the stored product.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, ServiceError> {
        let updated = self
            .store
            .apply(|products| {
                let existing = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("product"))?;
                patch.apply_to(existing)?;
                Ok(existing.clone())
            })
            .await?;
        info!(product_id = %updated.id, "product updated");
        Ok(updated)
    }

    /// Remove every record with `id`. Deleting an unknown id still rewrites
    /// the collection and succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let removed = self
            .store
            .apply(|products| {
                let before = products.len();
                products.retain(|p| p.id != id);
                Ok(before - products.len())
            })
            .await?;
        info!(product_id = %id, removed, "product delete");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductLookup for ProductCatalog {
    async fn product_exists(&self, id: &str) -> bool { self.get(id).await.is_some() }
}
