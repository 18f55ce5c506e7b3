use async_trait::async_trait;
use imagesize::ImageType;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use uuid::Uuid;

use super::config::MediaConfig;
use super::error::MediaError;
use super::image::ImageRef;
use super::traits::{MediaHost, MediaUpload};

/// Media host backed by an S3-compatible bucket.
///
/// Objects are written under `{folder}/{uuid}.{ext}`; the object key doubles
/// as the public identifier handed back to clients.
pub struct S3MediaHost {
    bucket: Box<Bucket>,
    public_url: String,
    folder: String,
}

impl S3MediaHost {
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| MediaError::Backend(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| MediaError::Backend(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            public_url: config.public_url.trim_end_matches('/').to_string(),
            folder: config.folder.trim_matches('/').to_string(),
        })
    }

    fn object_key(&self, extension: &str) -> String {
        let name = format!("{}.{extension}", Uuid::new_v4());
        if self.folder.is_empty() {
            name
        } else {
            format!("{}/{name}", self.folder)
        }
    }
}

/// Pick a file extension from the sniffed image type, falling back to the
/// declared content type.
fn extension_for(bytes: &[u8], content_type: &str) -> String {
    let sniffed = match imagesize::image_type(bytes) {
        Ok(ImageType::Jpeg) => Some("jpg"),
        Ok(ImageType::Png) => Some("png"),
        Ok(ImageType::Gif) => Some("gif"),
        Ok(ImageType::Webp) => Some("webp"),
        Ok(ImageType::Bmp) => Some("bmp"),
        _ => None,
    };

    sniffed
        .or_else(|| {
            mime_guess::get_mime_extensions_str(content_type)
                .and_then(|exts| exts.iter().copied().max_by_key(|ext| ext.len()))
        })
        .unwrap_or("bin")
        .to_string()
}

#[async_trait]
impl MediaHost for S3MediaHost {
    async fn upload(&self, upload: MediaUpload) -> Result<ImageRef, MediaError> {
        let size = imagesize::blob_size(&upload.bytes)
            .map_err(|e| MediaError::InvalidImage(e.to_string()))?;

        let key = self.object_key(&extension_for(&upload.bytes, &upload.content_type));
        let response = self
            .bucket
            .put_object_with_content_type(&key, &upload.bytes, &upload.content_type)
            .await
            .map_err(|e| MediaError::Backend(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(MediaError::Rejected { status });
        }

        tracing::debug!(key = %key, bytes = upload.bytes.len(), "Stored image");

        Ok(ImageRef {
            url: format!("{}/{key}", self.public_url),
            public_id: key,
            width: u32::try_from(size.width).ok(),
            height: u32::try_from(size.height).ok(),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        let response = self
            .bucket
            .delete_object(public_id)
            .await
            .map_err(|e| MediaError::Backend(e.to_string()))?;

        match response.status_code() {
            200..=299 | 404 => Ok(()),
            status => Err(MediaError::Rejected { status }),
        }
    }
}
