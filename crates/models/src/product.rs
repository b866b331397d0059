use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Catalog entry as stored in the products collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: u64,
    pub category: String,
    #[serde(default)]
    pub thumbnails: Vec<String>,
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool { true }

/// Creation input. Every field is optional at the wire so that absence is
/// reported as a validation error instead of a decode failure.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl NewProduct {
    /// Build the stored record under `id`.
    ///
    /// Presence is checked first for all required fields, then the numeric
    /// fields must be strictly positive. A zero `price` or `stock` is rejected
    /// at creation; `ProductPatch` may later bring stock down to zero.
    pub fn into_product(self, id: String) -> Result<Product, ModelError> {
        let title = required_text("title", self.title)?;
        let description = required_text("description", self.description)?;
        let code = required_text("code", self.code)?;
        let price = self.price.ok_or(ModelError::MissingField("price"))?;
        let stock = self.stock.ok_or(ModelError::MissingField("stock"))?;
        let category = required_text("category", self.category)?;

        validate_price(price)?;
        if stock <= 0 {
            return Err(ModelError::InvalidField { field: "stock", reason: "must be greater than zero" });
        }

        Ok(Product {
            id,
            title,
            description,
            code,
            price,
            stock: stock as u64,
            category,
            thumbnails: self.thumbnails.unwrap_or_default(),
            status: self.status.unwrap_or(true),
        })
    }
}

/// Partial update. Only the mutable fields exist here, so a record's `id`
/// can never be replaced through an update; an `id` key in the body is ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
    pub status: Option<bool>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("code", &self.code),
            ("category", &self.category),
        ] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ModelError::InvalidField { field, reason: "must not be empty" });
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Validate, then overwrite each field present in the patch.
    pub fn apply_to(self, product: &mut Product) -> Result<(), ModelError> {
        self.validate()?;
        if let Some(v) = self.title { product.title = v; }
        if let Some(v) = self.description { product.description = v; }
        if let Some(v) = self.code { product.code = v; }
        if let Some(v) = self.price { product.price = v; }
        if let Some(v) = self.stock { product.stock = v; }
        if let Some(v) = self.category { product.category = v; }
        if let Some(v) = self.thumbnails { product.thumbnails = v; }
        if let Some(v) = self.status { product.status = v; }
        Ok(())
    }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ModelError::MissingField(field)),
    }
}

fn validate_price(price: f64) -> Result<(), ModelError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ModelError::InvalidField { field: "price", reason: "must be greater than zero" });
    }
    Ok(())
}
