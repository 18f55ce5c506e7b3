use axum::{
    Json,
    extract::{DefaultBodyLimit, Multipart, State},
};
use common::media::MediaUpload;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::models::upload::UploadResponse;
use crate::state::AppState;

/// Room for multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Media",
    operation_id = "uploadImage",
    summary = "Upload an image to the media host",
    description = "Relays the `file` multipart field to the media host and returns the hosted image reference. Only images are accepted, up to the configured size (5 MB by default).",
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing, oversized or non-image file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Media host unavailable (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn upload_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let max_bytes = state.config.max_upload_bytes();

    let mut upload: Option<MediaUpload> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = image_content_type(field.content_type(), file_name.as_deref())?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        if data.is_empty() {
            return Err(AppError::Validation("file is empty".into()));
        }
        if data.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "file exceeds the {max_bytes} byte limit"
            )));
        }

        upload = Some(MediaUpload {
            bytes: data.to_vec(),
            content_type,
            file_name,
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::Validation("file is required".into()))?;
    let size = upload.bytes.len();
    let image = state.media.upload(upload).await?;
    info!(public_id = %image.public_id, size, "Image uploaded");

    Ok(Json(UploadResponse { image }))
}

/// Body limit for the upload route: the file cap plus multipart framing.
pub fn upload_body_limit(max_upload_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD))
}

/// Resolve the image MIME type from the declared part type, falling back to
/// the file name. Anything that is not `image/*` is rejected.
fn image_content_type(declared: Option<&str>, file_name: Option<&str>) -> Result<String, AppError> {
    let declared = declared
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

    let resolved = match declared {
        Some(ct) => Some(ct.to_ascii_lowercase()),
        None => file_name
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|mime| mime.essence_str().to_string()),
    };

    match resolved {
        Some(ct) if ct.starts_with("image/") => Ok(ct),
        _ => Err(AppError::Validation("Only image uploads are allowed".into())),
    }
}
