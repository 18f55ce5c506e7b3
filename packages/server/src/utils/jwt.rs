use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Role embedded in every token the server issues.
pub const ADMIN_ROLE: &str = "admin";

/// JWT Claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub role: String,
    pub email: String,
    pub iat: i64, // Issued-at timestamp
    pub exp: i64, // Expiration timestamp
}

/// Sign a new admin token valid for `ttl_days`.
pub fn sign(email: &str, ttl_days: i64, secret: &str) -> Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::days(ttl_days))
        .context("token expiry overflows the calendar")?;

    let claims = Claims {
        role: ADMIN_ROLE.to_owned(),
        email: email.to_owned(),
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    encode_claims(&claims, secret)
}

pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify signature and expiry, then decode.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
