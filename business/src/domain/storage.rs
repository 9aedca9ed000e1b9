use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Storage key holding the serialized products collection.
pub const KEY_PRODUCTS: &str = "products";
/// Storage key holding the serialized favorites set.
pub const KEY_FAVORITES: &str = "favorites";

/// Port for the durable key-value store backing the catalog.
///
/// Values are opaque strings; the application layer owns the JSON shape
/// written under each key. A missing key is a normal outcome, not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
