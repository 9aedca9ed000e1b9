use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use business::domain::errors::StorageError;
use business::domain::storage::KeyValueStore;

/// Configuration for the file-backed key-value store.
pub struct StorageConfig {
    pub root_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }
}

/// Durable key-value store keeping one JSON document per key under a root
/// directory, filling the role device key-value storage plays for the
/// mobile host.
///
/// Writes are last-write-wins; there is no cross-key transaction.
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            root: config.root_dir,
        }
    }

    /// Maps a key to its document path. Characters outside
    /// `[A-Za-z0-9._-]` are replaced so a key can never escape the root.
    fn document_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.document_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                warn!("Failed to read key {}: {}", key, err);
                Err(StorageError::Read)
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|_| StorageError::Write)?;
        fs::write(self.document_path(key), value)
            .await
            .map_err(|err| {
                warn!("Failed to write key {}: {}", key, err);
                StorageError::Write
            })
    }
}
