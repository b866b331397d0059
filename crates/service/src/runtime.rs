//! Runtime environment helpers
//!
//! Opens the collections named in the storage config and wires the services
//! together, so binaries do not need to know the file layout.

use std::sync::Arc;

use configs::{CatalogConfig, StorageConfig};
use tracing::info;

use crate::file::{CartService, ProductCatalog};
use crate::storage::CollectionStore;

/// Services sharing one data directory.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<ProductCatalog>,
    pub carts: Arc<CartService>,
}

/// Ensure the data directory exists.
pub async fn ensure_env(storage: &StorageConfig) -> anyhow::Result<()> {
    common::env::ensure_data_dir(&storage.data_dir).await
}

/// Open both collections and build the services over them.
pub async fn open_services(storage: &StorageConfig, catalog: &CatalogConfig) -> anyhow::Result<Services> {
    ensure_env(storage).await?;

    let products = CollectionStore::open("products", storage.products_path(), storage.write_mode).await?;
    let catalog = Arc::new(ProductCatalog::new(products).with_max_list_limit(catalog.max_list_limit));

    let carts = CollectionStore::open("carts", storage.carts_path(), storage.write_mode).await?;
    let carts = Arc::new(CartService::new(carts, catalog.clone()));

    info!(
        data_dir = %storage.data_dir.display(),
        write_mode = ?storage.write_mode,
        "collections opened"
    );
    Ok(Services { catalog, carts })
}
