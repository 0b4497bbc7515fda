//! Session management for authentication

use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Error;

/// Session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The user ID (the token's `sub` claim)
    pub user_id: String,

    /// The token type
    pub token_type: String,

    /// The expiry timestamp, in seconds since the epoch
    pub expires_at: Option<i64>,
}

/// The subset of access-token claims the client reads
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    exp: Option<i64>,
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

impl Session {
    /// Build a session from a token pair, reading the user id and expiry from
    /// the access token's claims
    ///
    /// The signature is not verified: the auth service is the only issuer and
    /// verifies the token itself on every request.
    pub fn from_tokens(access_token: &str, refresh_token: &str) -> Result<Self, Error> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(
            access_token,
            &DecodingKey::from_secret(&[]),
            &validation,
        )?;

        Ok(Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            user_id: data.claims.sub,
            token_type: "bearer".to_string(),
            expires_at: data.claims.exp,
        })
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now() >= expires_at,
            None => false,
        }
    }
}
