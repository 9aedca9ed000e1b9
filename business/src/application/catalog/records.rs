use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::model::Product;
use crate::domain::catalog::value_objects::Price;

/// Wire shape of a product inside the durable products document, a JSON
/// array of these records.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub photo: String,
    pub price: String,
}

impl ProductRecord {
    pub fn from_domain(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            photo: product.photo.clone(),
            price: product.price.as_str().to_string(),
        }
    }

    pub fn into_domain(self) -> Product {
        Product::from_storage(self.id, self.name, self.photo, Price::from_stored(self.price))
    }
}
