//! Product types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product, either as served by `GET /products/{id}` or as a cart line item.
///
/// Only `id` and `amount` mean anything to the cart. Everything else the API
/// returns (`title`, `price`, `image` and any other field) is kept verbatim
/// in `fields` and written back to storage unchanged, whatever its type.
/// `amount` is absent from API payloads and defaults to zero there; the cart
/// injects it when the product becomes a line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Quantity in cart.
    #[serde(default)]
    pub amount: i64,
    /// Display fields and anything else the API returned.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Create a product with the usual display fields and no amount.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            amount: 0,
            fields: Map::new(),
        }
        .with_field("title", title.into())
        .with_field("price", price)
        .with_field("image", image.into())
    }

    /// Return this product with `amount` replaced.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    /// Return this product with a pass-through field set.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Display title, if the API sent one as a string.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Image URL, if the API sent one as a string.
    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }

    /// Unit price as a number.
    ///
    /// Accepts JSON numbers and numeric strings; `None` for anything else.
    pub fn price(&self) -> Option<f64> {
        match self.fields.get("price")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Price multiplied by amount, when the price is numeric.
    pub fn subtotal(&self) -> Option<f64> {
        self.price().map(|price| price * self.amount as f64)
    }
}
