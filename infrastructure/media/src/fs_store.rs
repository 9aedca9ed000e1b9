use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::fs;
use tracing::{debug, warn};

use business::domain::media::ImageStore;

const IMAGES_DIR: &str = "product_images";
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
const FALLBACK_EXTENSION: &str = "jpg";

/// Configuration for app-owned media storage.
pub struct MediaConfig {
    /// Root of the app's document area; product images live in a
    /// subdirectory of it.
    pub document_dir: PathBuf,
}

impl MediaConfig {
    pub fn new(document_dir: impl Into<PathBuf>) -> Self {
        Self {
            document_dir: document_dir.into(),
        }
    }
}

/// Filesystem image store giving each product photo a lifetime tied to its
/// product.
///
/// Picker-returned locations may point into caches or content providers
/// that do not outlive the picker session; copying into the managed
/// directory decouples product durability from that lifetime.
pub struct FsImageStore {
    images_dir: PathBuf,
}

impl FsImageStore {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            images_dir: config.document_dir.join(IMAGES_DIR),
        }
    }

    /// Picks a destination path with a collision-resistant filename built
    /// from a millisecond timestamp and a random suffix.
    fn destination(&self, source: &str) -> PathBuf {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(9)
            .map(char::from)
            .collect();
        let filename = format!(
            "product_{}_{}.{}",
            Utc::now().timestamp_millis(),
            suffix,
            extension_for(source)
        );
        self.images_dir.join(filename)
    }

    async fn copy_into_store(
        &self,
        source: &str,
        inline_base64: Option<&str>,
    ) -> std::io::Result<String> {
        fs::create_dir_all(&self.images_dir).await?;
        let dest = self.destination(source);

        if let Some(payload) = inline_base64 {
            let bytes = STANDARD
                .decode(payload)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
            fs::write(&dest, bytes).await?;
            return Ok(dest.to_string_lossy().into_owned());
        }

        let source_path = strip_file_scheme(source);
        if fs::copy(source_path, &dest).await.is_err() {
            // Content-provider style sources can refuse a direct copy;
            // stream the bytes instead.
            let bytes = fs::read(source_path).await?;
            fs::write(&dest, bytes).await?;
        }
        Ok(dest.to_string_lossy().into_owned())
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn persist(&self, source: &str, inline_base64: Option<&str>) -> String {
        match self.copy_into_store(source, inline_base64).await {
            Ok(reference) => reference,
            Err(err) => {
                warn!("Keeping picker reference for {}: {}", source, err);
                source.to_string()
            }
        }
    }

    async fn delete(&self, reference: &str) {
        let path = strip_file_scheme(reference);
        if let Ok(true) = fs::try_exists(path).await {
            if let Err(err) = fs::remove_file(path).await {
                debug!("Failed to delete image {}: {}", reference, err);
            }
        }
    }

    fn is_managed(&self, reference: &str) -> bool {
        Path::new(strip_file_scheme(reference)).starts_with(&self.images_dir)
    }
}

fn strip_file_scheme(reference: &str) -> &str {
    reference.strip_prefix("file://").unwrap_or(reference)
}

/// Derives the destination extension from the source reference, falling
/// back to `jpg` for anything outside the allowlist.
fn extension_for(source: &str) -> &'static str {
    let ext = source.rsplit('.').next().unwrap_or_default().to_lowercase();
    ALLOWED_EXTENSIONS
        .into_iter()
        .find(|allowed| *allowed == ext)
        .unwrap_or(FALLBACK_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FsImageStore {
        FsImageStore::new(MediaConfig::new(dir.path()))
    }

    #[tokio::test]
    async fn should_copy_source_into_managed_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let source = dir.path().join("picked.png");
        std::fs::write(&source, b"png-bytes").unwrap();

        let reference = store
            .persist(&format!("file://{}", source.display()), None)
            .await;

        assert!(store.is_managed(&reference));
        assert!(reference.ends_with(".png"));
        assert_eq!(std::fs::read(&reference).unwrap(), b"png-bytes");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn should_default_unknown_extensions_to_jpg() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let source = dir.path().join("picked.gif");
        std::fs::write(&source, b"gif-bytes").unwrap();

        let reference = store.persist(&source.display().to_string(), None).await;

        assert!(reference.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn should_write_inline_payload_without_touching_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let payload = STANDARD.encode(b"jpeg-bytes");

        let reference = store
            .persist("file:///nonexistent/cache/picked.jpeg", Some(&payload))
            .await;

        assert!(store.is_managed(&reference));
        assert_eq!(std::fs::read(&reference).unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn should_return_source_unchanged_when_nothing_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let reference = store.persist("file:///nonexistent/cache/picked.jpg", None).await;

        assert_eq!(reference, "file:///nonexistent/cache/picked.jpg");
        assert!(!store.is_managed(&reference));
    }

    #[tokio::test]
    async fn should_return_source_unchanged_for_undecodable_inline_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let reference = store
            .persist("file:///cache/picked.jpg", Some("not base64 at all!"))
            .await;

        assert_eq!(reference, "file:///cache/picked.jpg");
    }

    #[tokio::test]
    async fn should_delete_managed_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let source = dir.path().join("picked.jpg");
        std::fs::write(&source, b"bytes").unwrap();

        let reference = store.persist(&source.display().to_string(), None).await;
        assert!(Path::new(&reference).exists());

        store.delete(&reference).await;
        assert!(!Path::new(&reference).exists());
    }

    #[tokio::test]
    async fn should_ignore_deletes_of_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.delete("/nonexistent/product_images/gone.jpg").await;
    }

    #[test]
    fn should_map_extensions_through_the_allowlist() {
        assert_eq!(extension_for("a/b/photo.PNG"), "png");
        assert_eq!(extension_for("a/b/photo.jpeg"), "jpeg");
        assert_eq!(extension_for("a/b/photo.gif"), "jpg");
        assert_eq!(extension_for("no-extension"), "jpg");
    }
}
