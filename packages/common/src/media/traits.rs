use async_trait::async_trait;

use super::error::MediaError;
use super::image::ImageRef;

/// Bytes of a single image to hand to the media host.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

/// Third-party image host.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Store an image and return a reference to the hosted asset.
    async fn upload(&self, upload: MediaUpload) -> Result<ImageRef, MediaError>;

    /// Remove a hosted asset by its host-assigned identifier.
    async fn destroy(&self, public_id: &str) -> Result<(), MediaError>;

    /// Best-effort removal: failures are logged and swallowed.
    async fn discard(&self, image: &ImageRef) {
        if !image.is_removable() {
            return;
        }
        if let Err(err) = self.destroy(&image.public_id).await {
            tracing::warn!(public_id = %image.public_id, error = %err, "Hosted image cleanup failed");
        }
    }
}

/// Stand-in used when no media section is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredMediaHost;

#[async_trait]
impl MediaHost for UnconfiguredMediaHost {
    async fn upload(&self, _upload: MediaUpload) -> Result<ImageRef, MediaError> {
        Err(MediaError::NotConfigured)
    }

    async fn destroy(&self, _public_id: &str) -> Result<(), MediaError> {
        Ok(())
    }
}
