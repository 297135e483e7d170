//! JWT session token generation and validation
//!
//! Sessions are stateless: a token is valid exactly when its HS256
//! signature matches the configured secret and the current time is before
//! its `exp` claim. Keys are derived once and shared behind `Arc`.

use anyhow::Result;
use chrono::Utc;
use fitness_goals_shared::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, decimal)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    token_expiry_secs: i64,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        // Expiry is checked by hand in `verify_at` with zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            token_expiry_secs,
            validation: Arc::new(validation),
        }
    }

    /// Issue a session token for a user, valid from now
    #[inline]
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Issue a session token as if the current time were `now`
    pub fn issue_at(&self, user_id: i64, now: i64) -> Result<String> {
        let exp = now
            .checked_add(self.token_expiry_secs)
            .ok_or_else(|| anyhow::anyhow!("Session token expiry overflows"))?;
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate session token: {}", e))
    }

    /// Verify a token and return the user id it was issued for
    #[inline]
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// Accepted while `now < exp`; from `exp` onwards the token is
    /// `TokenExpired`. Signature and shape problems are `InvalidToken`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<i64, AuthError> {
        let claims = self.decode_claims(token)?;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        claims
            .sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(AuthError::InvalidToken)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Rejected session token");
                AuthError::InvalidToken
            })
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_secs
    }
}
