//! Product domain model.

use serde::{Deserialize, Serialize};

/// A named tax entry attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTaxInfo {
    pub tax_name: String,
    pub value: f64,
}

/// Catalog product.
///
/// `name` is stored normalized (see [`crate::utils::normalize`]) so that
/// lookups against POS display text are accent- and case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub base_price: f64,
    pub total_price: f64,
    pub taxes: Vec<ProductTaxInfo>,
}
