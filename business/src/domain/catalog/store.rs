use async_trait::async_trait;
use uuid::Uuid;

use super::errors::CatalogError;
use super::model::{NewProductProps, Product};

/// Maximum number of products a user may keep in the catalog.
pub const MAX_PRODUCTS: usize = 5;

/// Port for the single source of truth over products and favorites.
///
/// One instance is owned by the host application and handed to consumers
/// by reference; it is never reached through an ambient singleton. The
/// host environment serializes mutations, so at most one is in flight at
/// a time.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Loads persisted products and favorites. Missing, malformed or
    /// unreadable data yields empty collections; hydration itself never
    /// fails. Persistence stays disabled until hydration has completed.
    async fn hydrate(&self);

    /// Adds a product unless the catalog is full.
    ///
    /// Returns `Ok(None)` when the cap is already reached; the caller is
    /// expected to pre-check and surface the limit message. Name and price
    /// validation failures are errors.
    async fn add_product(
        &self,
        candidate: NewProductProps,
    ) -> Result<Option<Product>, CatalogError>;

    /// Removes the product with the given id, pruning it from favorites
    /// and cleaning up its managed image file. A no-op for unknown ids.
    async fn remove_product(&self, id: Uuid);

    /// Flips favorites membership for `id`. Ids absent from the catalog
    /// may be favorited; consumers filter against live products at use
    /// time.
    async fn toggle_favorite(&self, id: Uuid);

    async fn is_favorite(&self, id: Uuid) -> bool;

    async fn is_limit_reached(&self) -> bool;

    /// Remaining capacity, used by the add screen to cap batch entry.
    async fn slots_remaining(&self) -> usize;

    /// Snapshot of the catalog in insertion order.
    async fn products(&self) -> Vec<Product>;

    /// Whether the initial load from durable storage has completed.
    async fn is_hydrated(&self) -> bool;
}
