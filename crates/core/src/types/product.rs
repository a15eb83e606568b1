//! Catalog and inventory facts supplied by the remote API.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// An immutable catalog fact about a purchasable product.
///
/// The wire field for the product image is `image`, matching the catalog
/// API's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(rename = "image")]
    pub image_url: String,
}

/// Available inventory for a product, independent of any cart's contents.
///
/// `amount` is the authoritative current availability at the time of the
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: ProductId,
    pub amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_deserializes_api_shape() {
        let json = r#"{
            "id": 1,
            "title": "Sneaker",
            "price": 179.9,
            "image": "https://cdn.example.com/sneaker.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).expect("parse product");
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Sneaker");
        assert_eq!(product.price.amount(), Decimal::new(1799, 1));
        assert_eq!(product.image_url, "https://cdn.example.com/sneaker.jpg");
    }

    #[test]
    fn test_stock_entry_deserializes() {
        let stock: StockEntry =
            serde_json::from_str(r#"{"id": 1, "amount": 3}"#).expect("parse stock");
        assert_eq!(stock.id, ProductId::new(1));
        assert_eq!(stock.amount, 3);
    }
}
