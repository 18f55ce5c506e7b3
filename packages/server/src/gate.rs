//! The single-admin credential gate.

use common::password::{secrets_match, verify_password};
use tracing::warn;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::utils::jwt::{self, ADMIN_ROLE, Claims};

#[derive(Debug, Clone)]
enum AdminSecret {
    Hashed(String),
    Plain(String),
    Unset,
}

/// Issues and checks admin tokens against the configured identity.
#[derive(Debug, Clone)]
pub struct AdminGate {
    admin_email: String,
    secret: AdminSecret,
    jwt_secret: String,
    token_ttl_days: i64,
}

impl AdminGate {
    pub fn new(config: &AuthConfig) -> Self {
        let hash = config
            .admin_password_hash
            .as_deref()
            .filter(|h| !h.trim().is_empty());
        let plain = config
            .admin_password
            .as_deref()
            .filter(|p| !p.is_empty());

        let secret = match (hash, plain) {
            (Some(hash), plain) => {
                if plain.is_some() {
                    warn!("Both admin password forms are configured; the hash takes precedence");
                }
                AdminSecret::Hashed(hash.trim().to_string())
            }
            (None, Some(plain)) => AdminSecret::Plain(plain.to_string()),
            (None, None) => {
                warn!("No admin password configured; every login will be refused");
                AdminSecret::Unset
            }
        };

        Self {
            admin_email: config.admin_email.clone(),
            secret,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_days: config.token_ttl_days,
        }
    }

    /// Exchange admin credentials for a signed token.
    ///
    /// Missing fields are a validation error. A wrong email and a wrong
    /// password are indistinguishable to the caller.
    pub fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<String, AppError> {
        let (email, password) = match (email, password) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => return Err(AppError::Validation("Email and password required".into())),
        };

        if email != self.admin_email {
            return Err(AppError::InvalidCredentials);
        }

        let ok = match &self.secret {
            AdminSecret::Hashed(hash) => verify_password(password, hash)
                .map_err(|e| AppError::Internal(format!("Admin password hash unusable: {e}")))?,
            AdminSecret::Plain(plain) => secrets_match(password, plain),
            AdminSecret::Unset => false,
        };
        if !ok {
            return Err(AppError::InvalidCredentials);
        }

        jwt::sign(email, self.token_ttl_days, &self.jwt_secret)
            .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))
    }

    /// Check a bearer token. Every failure collapses into `TokenInvalid`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = jwt::verify(token, &self.jwt_secret).map_err(|_| AppError::TokenInvalid)?;
        if claims.role != ADMIN_ROLE {
            return Err(AppError::TokenInvalid);
        }
        Ok(claims)
    }
}
