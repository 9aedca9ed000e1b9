use async_trait::async_trait;

/// An image selected by the user through a platform picker.
///
/// The `uri` may point into a picker cache or a content provider whose
/// lifetime ends with the picker session. `base64` carries the inline
/// payload when the picker supplied one.
#[derive(Debug, Clone)]
pub struct PickedImage {
    pub uri: String,
    pub base64: Option<String>,
}

/// Port for app-owned permanent image storage.
///
/// Infallible by contract: persistence falls back to the original source
/// reference and deletion failures are swallowed, so no caller of a
/// user-initiated action ever sees a filesystem error from this port.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Copies a picked image into permanent storage and returns its new
    /// reference, or the original source reference when nothing durable
    /// could be written.
    async fn persist(&self, source: &str, inline_base64: Option<&str>) -> String;

    /// Deletes the file at `reference` if it exists.
    async fn delete(&self, reference: &str);

    /// Whether `reference` points under the permanent image directory.
    fn is_managed(&self, reference: &str) -> bool;
}
