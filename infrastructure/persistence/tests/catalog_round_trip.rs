use std::path::Path;
use std::sync::Arc;

use business::application::catalog::store::CatalogStoreImpl;
use business::domain::catalog::model::NewProductProps;
use business::domain::catalog::store::{CatalogStore, MAX_PRODUCTS};
use business::domain::media::PickedImage;
use logger::tracing_logger::TracingLogger;
use media::fs_store::{FsImageStore, MediaConfig};
use persistence::file_store::{FileKeyValueStore, StorageConfig};

fn build_store(document_dir: &Path) -> CatalogStoreImpl {
    CatalogStoreImpl::new(
        Arc::new(FileKeyValueStore::new(StorageConfig::new(
            document_dir.join("storage"),
        ))),
        Arc::new(FsImageStore::new(MediaConfig::new(document_dir))),
        Arc::new(TracingLogger),
    )
}

fn candidate(document_dir: &Path, name: &str, price: &str) -> NewProductProps {
    let source = document_dir.join(format!("{}.jpg", name.to_lowercase().replace(' ', "-")));
    std::fs::write(&source, name.as_bytes()).unwrap();
    NewProductProps {
        name: name.to_string(),
        photo: PickedImage {
            uri: source.display().to_string(),
            base64: None,
        },
        price: price.to_string(),
    }
}

#[tokio::test]
async fn hydrating_reproduces_the_persisted_catalog() {
    let dir = tempfile::tempdir().unwrap();

    let store = build_store(dir.path());
    store.hydrate().await;
    let mug = store
        .add_product(candidate(dir.path(), "Mug", "19.99"))
        .await
        .unwrap()
        .unwrap();
    store
        .add_product(candidate(dir.path(), "Desk Lamp", "1234.5"))
        .await
        .unwrap()
        .unwrap();
    store.toggle_favorite(mug.id).await;

    let reloaded = build_store(dir.path());
    reloaded.hydrate().await;

    assert_eq!(reloaded.products().await, store.products().await);
    assert!(reloaded.is_favorite(mug.id).await);
    assert_eq!(reloaded.products().await[1].price.as_str(), "1234.50");
}

#[tokio::test]
async fn the_capacity_limit_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let store = build_store(dir.path());
    store.hydrate().await;
    for i in 0..MAX_PRODUCTS {
        store
            .add_product(candidate(dir.path(), &format!("Product {}", i), "0.00"))
            .await
            .unwrap();
    }

    let reloaded = build_store(dir.path());
    reloaded.hydrate().await;

    assert!(reloaded.is_limit_reached().await);
    let rejected = reloaded
        .add_product(candidate(dir.path(), "One too many", "1"))
        .await
        .unwrap();
    assert!(rejected.is_none());
    assert_eq!(reloaded.products().await.len(), MAX_PRODUCTS);
}

#[tokio::test]
async fn removing_a_product_deletes_its_managed_image() {
    let dir = tempfile::tempdir().unwrap();

    let store = build_store(dir.path());
    store.hydrate().await;
    let product = store
        .add_product(candidate(dir.path(), "Mug", "5"))
        .await
        .unwrap()
        .unwrap();
    assert!(Path::new(&product.photo).exists());

    store.remove_product(product.id).await;

    assert!(!Path::new(&product.photo).exists());
    let reloaded = build_store(dir.path());
    reloaded.hydrate().await;
    assert!(reloaded.products().await.is_empty());
    assert!(!reloaded.is_favorite(product.id).await);
}
