//! Record types persisted by the shop collections, with the validation
//! rules every stored record satisfies.

pub mod errors;
pub mod ids;
pub mod product;
pub mod cart;

pub use cart::{Cart, CartLine};
pub use product::{NewProduct, Product, ProductPatch};
