//! Product models.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_owned())
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId(n.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product as owned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Stock quantity.
    pub quantity: i64,
    /// Image URL, if an image was uploaded.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Accept numeric or string IDs from the backend.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<ProductId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => ProductId::from(n),
        RawId::Text(s) => ProductId(s),
    })
}

/// Edit buffer for a product being created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Stock quantity.
    pub quantity: i64,
}

impl ProductDraft {
    /// Validate the draft before submission.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("product name must not be empty"));
        }
        if !(self.price > 0.0) {
            return Err(Error::invalid("price must be greater than zero"));
        }
        if self.quantity < 0 {
            return Err(Error::invalid("quantity must not be negative"));
        }
        Ok(())
    }
}

impl Product {
    /// Validate an edited product before submission. Same rules as drafts.
    pub fn validate(&self) -> Result<()> {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
        }
        .validate()
    }
}

/// An image file attached to a create or update request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, forwarded to the backend.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload from a file name and contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Apple".into(),
            description: "Fresh".into(),
            price: 1.5,
            quantity: 10,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_ok());

        let mut d = draft();
        d.name = "  ".into();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.price = 0.0;
        assert!(d.validate().is_err());

        let mut d = draft();
        d.quantity = -1;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{
            "id": 7,
            "name": "Apple",
            "description": "Fresh",
            "price": 1.5,
            "quantity": 10,
            "imageUrl": "http://localhost:9000/images/apple.png"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::from(7));
        assert_eq!(product.name, "Apple");
        assert_eq!(
            product.image_url.as_deref(),
            Some("http://localhost:9000/images/apple.png")
        );
    }

    #[test]
    fn test_product_string_id_and_missing_optionals() {
        let json = r#"{"id":"p-9","name":"Banana","price":0.5,"quantity":3}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p-9");
        assert_eq!(product.description, "");
        assert_eq!(product.image_url, None);
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let value = serde_json::to_value(draft()).unwrap();
        assert!(value.get("name").is_some());
        assert!(value.get("quantity").is_some());
        // field names the backend expects
        assert_eq!(value.get("price").unwrap().as_f64(), Some(1.5));
    }
}
