use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored product. `id` is assigned by the repository on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// A product that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl NewProduct {
    pub fn with_id(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Incoming payload for `POST /api/product`.
///
/// Nothing is validated: empty names and negative prices are stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    /// A JSON number (`1200`, `19.99`); a numeric string is accepted too.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

/// Outgoing product in `GET /api/product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Written as a JSON number with the stored scale (`10.10` stays `10.10`).
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_copies_every_field() {
        let product = Product {
            id: "64b7f0".to_string(),
            name: "iPhone 13".to_string(),
            description: "iPhone 13".to_string(),
            price: Decimal::new(120050, 2),
        };

        let response = ProductResponse::from(product.clone());
        assert_eq!(response.id, product.id);
        assert_eq!(response.name, product.name);
        assert_eq!(response.description, product.description);
        assert_eq!(response.price, product.price);
    }

    #[test]
    fn test_request_accepts_numeric_and_string_prices() {
        let numeric: ProductRequest =
            serde_json::from_str(r#"{"name":"a","description":"b","price":1200}"#).unwrap();
        let text: ProductRequest =
            serde_json::from_str(r#"{"name":"a","description":"b","price":"19.99"}"#).unwrap();

        assert_eq!(numeric.price, Decimal::from(1200));
        assert_eq!(text.price, Decimal::new(1999, 2));
    }

    #[test]
    fn test_price_is_an_exact_json_number() {
        let response = ProductResponse {
            id: "1".to_string(),
            name: "a".to_string(),
            description: "b".to_string(),
            price: Decimal::new(1010, 2),
        };

        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains(r#""price":10.10"#), "{}", text);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["price"].is_number());
        assert_eq!(json["price"].to_string(), "10.10");
    }

    #[test]
    fn test_whole_price_is_written_without_quotes() {
        let response = ProductResponse {
            id: "1".to_string(),
            name: "iPhone 13".to_string(),
            description: "iPhone 13".to_string(),
            price: Decimal::from(1200),
        };
        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains(r#""price":1200"#), "{}", text);
    }
}
