use uuid::Uuid;

use super::errors::CatalogError;
use super::value_objects::Price;
use crate::domain::media::PickedImage;

/// A user-entered catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Reference to the product photo. Points under the app-owned image
    /// directory except when image persistence fell back to the picker
    /// source.
    pub photo: String,
    pub price: Price,
}

/// Candidate data for a product about to be added. The photo still points
/// at the picker-provided source location.
pub struct NewProductProps {
    pub name: String,
    pub photo: PickedImage,
    pub price: String,
}

impl Product {
    /// Creates a product from candidate fields and a photo reference,
    /// assigning a fresh id. The name is trimmed and must not end up empty;
    /// the price text is normalized to canonical fixed-point form.
    pub fn new(name: &str, photo: String, price: &str) -> Result<Self, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::NameEmpty);
        }
        let price = Price::parse(price)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            photo,
            price,
        })
    }

    /// Constructor for data already persisted in durable storage (no
    /// validation).
    pub fn from_storage(id: Uuid, name: String, photo: String, price: Price) -> Self {
        Self {
            id,
            name,
            photo,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_product_with_trimmed_name() {
        let product = Product::new("  Wireless Headphones ", "file:///p/a.jpg".into(), "25000")
            .unwrap();
        assert_eq!(product.name, "Wireless Headphones");
        assert_eq!(product.price.as_str(), "25000.00");
    }

    #[test]
    fn should_reject_empty_name() {
        let result = Product::new("   ", "file:///p/a.jpg".into(), "10");
        assert!(matches!(result, Err(CatalogError::NameEmpty)));
    }

    #[test]
    fn should_reject_unparseable_price() {
        let result = Product::new("Mug", "file:///p/a.jpg".into(), "free");
        assert!(matches!(result, Err(CatalogError::PriceInvalid)));
    }

    #[test]
    fn should_assign_unique_ids() {
        let first = Product::new("Mug", "a.jpg".into(), "1").unwrap();
        let second = Product::new("Mug", "a.jpg".into(), "1").unwrap();
        assert_ne!(first.id, second.id);
    }
}
