use axum::Json;

use crate::models::shared::OkResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Service is up", body = OkResponse),
    ),
)]
pub async fn health() -> Json<OkResponse> {
    Json(OkResponse::new())
}
