mod config;
mod error;
mod image;
mod traits;

#[cfg(feature = "object-storage")]
pub mod s3;

pub use config::{MediaConfig, default_max_upload_bytes};
pub use error::MediaError;
pub use image::ImageRef;
pub use traits::{MediaHost, MediaUpload, UnconfiguredMediaHost};
