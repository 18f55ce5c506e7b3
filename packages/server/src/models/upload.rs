use common::ImageRef;
use serde::Serialize;

/// Hosted image produced by an upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub image: ImageRef,
}
