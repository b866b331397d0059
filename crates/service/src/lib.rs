//! Service layer: JSON-file collections and the catalog/cart operations
//! built on them.
//! - `storage` owns the load / mutate / persist cycle.
//! - `file` holds the product catalog and cart services.
//! - Errors are reported through [`errors::ServiceError`].

pub mod errors;
pub mod lookup;
pub mod pagination;
pub mod runtime;
pub mod storage;
pub mod file;
