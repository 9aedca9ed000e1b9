use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::model::{NewProductProps, Product};
use crate::domain::catalog::store::{CatalogStore, MAX_PRODUCTS};
use crate::domain::logger::Logger;
use crate::domain::media::ImageStore;
use crate::domain::storage::{KEY_FAVORITES, KEY_PRODUCTS, KeyValueStore};

use super::records::ProductRecord;

#[derive(Default)]
struct CatalogState {
    products: Vec<Product>,
    favorites: HashSet<Uuid>,
    hydrated: bool,
}

/// Store implementation bridging in-memory catalog state to durable
/// key-value storage and app-owned image storage.
///
/// In-memory state is authoritative for the session: every mutation is
/// applied immediately and re-serialized to storage best-effort afterwards.
pub struct CatalogStoreImpl {
    state: Mutex<CatalogState>,
    storage: Arc<dyn KeyValueStore>,
    images: Arc<dyn ImageStore>,
    logger: Arc<dyn Logger>,
}

impl CatalogStoreImpl {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        images: Arc<dyn ImageStore>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            state: Mutex::new(CatalogState::default()),
            storage,
            images,
            logger,
        }
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(_) => {
                self.logger
                    .warn(&format!("Failed to read {} from durable storage", key));
                None
            }
        }
    }

    /// Clones the state out of the guard, releases it, and re-serializes
    /// both documents. Writes are independent and best-effort; the two keys
    /// are not updated atomically.
    async fn snapshot_and_persist(&self, state: MutexGuard<'_, CatalogState>) {
        let hydrated = state.hydrated;
        let products = state.products.clone();
        let favorites = state.favorites.clone();
        drop(state);

        if !hydrated {
            return;
        }

        let records: Vec<ProductRecord> = products.iter().map(ProductRecord::from_domain).collect();
        match serde_json::to_string(&records) {
            Ok(payload) => {
                if self.storage.set(KEY_PRODUCTS, &payload).await.is_err() {
                    self.logger
                        .warn("Failed to persist products, in-memory state kept");
                }
            }
            Err(_) => self.logger.warn("Failed to serialize products"),
        }

        let ids: Vec<Uuid> = favorites.iter().copied().collect();
        match serde_json::to_string(&ids) {
            Ok(payload) => {
                if self.storage.set(KEY_FAVORITES, &payload).await.is_err() {
                    self.logger
                        .warn("Failed to persist favorites, in-memory state kept");
                }
            }
            Err(_) => self.logger.warn("Failed to serialize favorites"),
        }
    }
}

#[async_trait]
impl CatalogStore for CatalogStoreImpl {
    async fn hydrate(&self) {
        self.logger.info("Hydrating catalog from durable storage");

        let stored_products = self.read_key(KEY_PRODUCTS).await;
        let stored_favorites = self.read_key(KEY_FAVORITES).await;

        let products: Vec<Product> = stored_products
            .and_then(|raw| serde_json::from_str::<Vec<ProductRecord>>(&raw).ok())
            .map(|records| records.into_iter().map(ProductRecord::into_domain).collect())
            .unwrap_or_default();
        let favorites: HashSet<Uuid> = stored_favorites
            .and_then(|raw| serde_json::from_str::<Vec<Uuid>>(&raw).ok())
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_default();

        let mut state = self.state.lock().await;
        state.products = products;
        state.favorites = favorites;
        state.hydrated = true;
        self.logger.info(&format!(
            "Hydrated {} products and {} favorites",
            state.products.len(),
            state.favorites.len()
        ));
    }

    async fn add_product(
        &self,
        candidate: NewProductProps,
    ) -> Result<Option<Product>, CatalogError> {
        {
            let state = self.state.lock().await;
            if state.products.len() >= MAX_PRODUCTS {
                self.logger.warn("Product limit reached, ignoring add");
                return Ok(None);
            }
        }

        // Validate before any filesystem work; the photo starts at the
        // picker source and is upgraded once the image store has copied it.
        let mut product =
            Product::new(&candidate.name, candidate.photo.uri.clone(), &candidate.price)?;
        self.logger.info(&format!("Adding product: {}", product.name));
        product.photo = self
            .images
            .persist(&candidate.photo.uri, candidate.photo.base64.as_deref())
            .await;

        let mut state = self.state.lock().await;
        state.products.push(product.clone());
        self.snapshot_and_persist(state).await;

        self.logger
            .info(&format!("Product added with id: {}", product.id));
        Ok(Some(product))
    }

    async fn remove_product(&self, id: Uuid) {
        self.logger.info(&format!("Removing product: {}", id));

        let mut state = self.state.lock().await;
        let index = state.products.iter().position(|p| p.id == id);
        let removed = index.map(|i| state.products.remove(i));
        state.favorites.remove(&id);
        self.snapshot_and_persist(state).await;

        if let Some(product) = removed {
            if self.images.is_managed(&product.photo) {
                self.images.delete(&product.photo).await;
            }
            self.logger.info(&format!("Product removed: {}", id));
        }
    }

    async fn toggle_favorite(&self, id: Uuid) {
        let mut state = self.state.lock().await;
        if !state.favorites.remove(&id) {
            state.favorites.insert(id);
        }
        self.snapshot_and_persist(state).await;
    }

    async fn is_favorite(&self, id: Uuid) -> bool {
        self.state.lock().await.favorites.contains(&id)
    }

    async fn is_limit_reached(&self) -> bool {
        self.state.lock().await.products.len() >= MAX_PRODUCTS
    }

    async fn slots_remaining(&self) -> usize {
        MAX_PRODUCTS.saturating_sub(self.state.lock().await.products.len())
    }

    async fn products(&self) -> Vec<Product> {
        self.state.lock().await.products.clone()
    }

    async fn is_hydrated(&self) -> bool {
        self.state.lock().await.hydrated
    }
}
