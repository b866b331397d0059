use serde::{Deserialize, Serialize};

/// One product reference inside a cart. `product` is an id only; the
/// referenced product may since have been deleted from the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub products: Vec<CartLine>,
}

impl Cart {
    pub fn new(id: String) -> Self {
        Self { id, products: Vec::new() }
    }

    /// Add one unit of `product_id`: bump the existing line or append a new
    /// line with quantity 1. Each product id has at most one line.
    pub fn add_product(&mut self, product_id: &str) -> &CartLine {
        let idx = match self.products.iter().position(|l| l.product == product_id) {
            Some(idx) => {
                let line = &mut self.products[idx];
                line.quantity = line.quantity.saturating_add(1);
                idx
            }
            None => {
                self.products.push(CartLine { product: product_id.to_string(), quantity: 1 });
                self.products.len() - 1
            }
        };
        &self.products[idx]
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.products
            .iter()
            .find(|l| l.product == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_insertion_increments_single_line() {
        let mut cart = Cart::new("c1".into());
        assert_eq!(cart.add_product("p1").quantity, 1);
        assert_eq!(cart.add_product("p1").quantity, 2);
        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn distinct_products_keep_insertion_order() {
        let mut cart = Cart::new("c1".into());
        cart.add_product("a");
        cart.add_product("b");
        cart.add_product("a");
        let order: Vec<&str> = cart.products.iter().map(|l| l.product.as_str()).collect();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(cart.quantity_of("b"), 1);
        assert_eq!(cart.quantity_of("missing"), 0);
    }

    #[test]
    fn wire_shape() {
        let mut cart = Cart::new("c1".into());
        cart.add_product("p1");
        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            serde_json::json!({"id": "c1", "products": [{"product": "p1", "quantity": 1}]})
        );
    }
}
