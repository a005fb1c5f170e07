use serde::{Deserialize, Deserializer, Serialize};

use pricecalc_core::{Entity, ProductId};

/// Price given to every newly added product.
pub const DEFAULT_PRICE: f64 = 9.99;

/// Maximum title length in characters, on creation and on edit alike.
pub const MAX_TITLE_CHARS: usize = 24;

/// A product row: stable id plus user-editable title and price.
///
/// Serializes as the plain `{id, title, price}` record used both for storage
/// and for export. A `null` price (older data could persist NaN) reads back as
/// NaN, which the pricing model treats as "no data". Stored titles go through
/// the same length limit as new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredProduct")]
pub struct Product {
    id: ProductId,
    title: String,
    price: f64,
}

/// Wire shape of a product before the title limit is applied.
#[derive(Deserialize)]
struct StoredProduct {
    id: ProductId,
    title: String,
    #[serde(deserialize_with = "nullable_price")]
    price: f64,
}

impl From<StoredProduct> for Product {
    fn from(stored: StoredProduct) -> Self {
        Product::new(stored.id, stored.title, stored.price)
    }
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: clamp_title(title.into()),
            price,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub(crate) fn set_id(&mut self, id: ProductId) {
        self.id = id;
    }

    pub(crate) fn apply(&mut self, field: ProductField) {
        match field {
            ProductField::Title(title) => self.title = clamp_title(title),
            ProductField::Price(price) => self.price = price,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One editable field with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductField {
    Title(String),
    Price(f64),
}

/// Truncate to `MAX_TITLE_CHARS` on a character boundary.
fn clamp_title(title: String) -> String {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((cut, _)) => title[..cut].to_string(),
        None => title,
    }
}

fn nullable_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        s.parse().unwrap()
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        let product = Product::new(id("p1"), "ü".repeat(30), 1.0);
        assert_eq!(product.title().chars().count(), MAX_TITLE_CHARS);

        let short = Product::new(id("p2"), "Widget", 1.0);
        assert_eq!(short.title(), "Widget");
    }

    #[test]
    fn edited_titles_use_the_same_limit() {
        let mut product = Product::new(id("p1"), "Widget", 1.0);
        product.apply(ProductField::Title("x".repeat(40)));
        assert_eq!(product.title().len(), MAX_TITLE_CHARS);
    }

    #[test]
    fn serializes_as_plain_record() {
        let product = Product::new(id("abc"), "Widget", 9.99);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json, serde_json::json!({"id": "abc", "title": "Widget", "price": 9.99}));
    }

    #[test]
    fn stored_titles_are_truncated_on_load() {
        let json = format!(r#"{{"id":"abc","title":"{}","price":1.0}}"#, "x".repeat(30));
        let product: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product.title().len(), MAX_TITLE_CHARS);
    }

    #[test]
    fn null_price_reads_as_nan() {
        let product: Product =
            serde_json::from_str(r#"{"id":"abc","title":"Widget","price":null}"#).unwrap();
        assert!(product.price().is_nan());
    }
}
