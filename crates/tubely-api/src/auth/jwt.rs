//! HS256 access tokens
//!
//! Tokens carry the user id in `sub` and are bound to a single issuer.
//! Expiry is checked without leeway.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tubely_core::AppError;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header, or a scheme other than `Bearer`.
    #[error("Missing bearer token")]
    MissingCredential,

    #[error("{0}")]
    InvalidCredential(String),

    #[error("Failed to create token: {0}")]
    TokenCreation(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => {
                AppError::Unauthorized("Missing or malformed Authorization header".to_string())
            }
            AuthError::InvalidCredential(msg) => AppError::Unauthorized(msg),
            AuthError::TokenCreation(msg) => AppError::Internal(msg),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Mint a token for `user_id` that expires after `ttl`.
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Verify signature, issuer and expiry, and resolve the token to a user id.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                let message = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token has expired".to_string(),
                    ErrorKind::InvalidIssuer => "Invalid token issuer".to_string(),
                    ErrorKind::InvalidSignature => "Invalid token signature".to_string(),
                    _ => format!("Invalid token: {}", e),
                };
                AuthError::InvalidCredential(message)
            })?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AuthError::InvalidCredential("Invalid token subject".to_string()))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredential)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}
