use serde::{Deserialize, Serialize};

/// Request body for admin login. Both fields are required; they are optional
/// here so that a missing field is reported as a validation error.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Configured admin email.
    #[schema(example = "admin@example.org")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}
