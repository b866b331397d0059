//! File-backed domain services.

pub mod product_catalog;
pub mod cart_service;

pub use cart_service::CartService;
pub use product_catalog::ProductCatalog;
