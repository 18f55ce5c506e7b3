use axum::{Json, extract::State};
use tracing::{instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::client_ip::ClientIp;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Exchange admin credentials for a token",
    description = "Checks the email against the single configured admin and the password against the configured hash or plaintext secret. Returns a bearer token valid for 7 days. Limited to 20 attempts per client per 10 minutes; the limit is checked before the credentials.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid credentials (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 429, description = "Too many attempts (RATE_LIMITED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(client = %client.0))]
pub async fn login(
    client: ClientIp,
    State(state): State<AppState>,
    payload: Result<AppJson<LoginRequest>, AppError>,
) -> Result<Json<LoginResponse>, AppError> {
    if let Err(retry_after) = state.login_limiter.check(&client.0) {
        warn!(retry_after, "Login throttled");
        return Err(AppError::RateLimited { retry_after });
    }

    let AppJson(payload) = payload?;
    let token = state
        .gate
        .login(payload.email.as_deref(), payload.password.as_deref())?;

    Ok(Json(LoginResponse { token }))
}
