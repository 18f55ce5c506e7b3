use thiserror::Error;

/// Errors that can occur while talking to the media host.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The uploaded bytes are not an image the host can store.
    #[error("unsupported image: {0}")]
    InvalidImage(String),
    /// No media host has been configured for this deployment.
    #[error("media host is not configured")]
    NotConfigured,
    /// The host answered with a non-success status.
    #[error("media host rejected the request with status {status}")]
    Rejected { status: u16 },
    /// Transport or client-side failure.
    #[error("media host error: {0}")]
    Backend(String),
}
