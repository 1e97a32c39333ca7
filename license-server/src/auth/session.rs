//! Signed session credentials
//!
//! A session credential is an HS256 JWT binding a license id and email, with
//! a fixed 24-hour validity window independent of the license's own expiry.
//! It cannot be revoked early; the short window is what bounds the staleness
//! of any revocation or expiry, by forcing clients back to the store at
//! least daily.

use http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims for a session credential
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// License id
    pub sub: String,
    /// License owner email
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
    /// Unique token id; makes every issued credential distinct
    pub jti: String,
}

const SESSION_TTL_HOURS: i64 = 24;

/// Create a session credential for a license
pub fn create_token(
    license_id: &str,
    email: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: license_id.to_string(),
        email: email.to_string(),
        exp: (now + chrono::Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
        jti: uuid::Uuid::new_v4().to_string(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a session credential's signature and expiry, returning its claims
pub fn verify_token(
    token: &str,
    secret: &str,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Extract a bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
