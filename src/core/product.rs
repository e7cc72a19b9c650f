//! Secondary store product record

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product sold through the `/public` store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[validate(range(min = 1))]
    pub id: u32,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    pub image_url: String,

    pub stock: u32,
}

impl Product {
    /// Products with stock on hand are listed in the store
    pub fn is_active(&self) -> bool {
        self.stock > 0
    }

    /// "$19.99"
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}
