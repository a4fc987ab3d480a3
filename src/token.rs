//! Expiry extraction from Firebase ID tokens.
//!
//! Tokens are never verified here. The payload segment is decoded only to read
//! the `exp` claim, which drives refresh scheduling.

use base64::prelude::{BASE64_URL_SAFE, BASE64_URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading claims from an ID token.
#[derive(Debug, Error)]
pub enum TokenDecodeError {
    /// The token does not have the `header.payload.signature` shape.
    #[error("token is not a three-part JWT")]
    Malformed,

    /// The payload segment is not valid base64url.
    #[error("could not base64-decode token payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload is not a JSON object of the expected shape.
    #[error("could not parse token payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload has no numeric `exp` claim.
    #[error("token payload has no `exp` claim")]
    MissingExpiry,
}

/// The subset of Firebase ID token claims the refresh logic cares about.
///
/// See: <https://firebase.google.com/docs/auth/admin/verify-id-tokens#verify_id_tokens_using_a_third-party_jwt_library>
#[derive(Clone, Debug, Deserialize)]
pub struct IdTokenClaims {
    /// Expiration time (epoch seconds)
    pub exp: Option<u64>,

    /// Issued-at time (epoch seconds)
    pub iat: Option<u64>,

    /// Firebase UID of the user
    pub user_id: Option<String>,
}

impl IdTokenClaims {
    /// Decodes the payload segment of `token` without checking its signature.
    pub fn decode(token: &str) -> Result<Self, TokenDecodeError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenDecodeError::Malformed);
        }

        let segment = parts[1].trim();
        // Some issuers keep the padding; accept both forms.
        let payload = if segment.ends_with('=') {
            BASE64_URL_SAFE.decode(segment)?
        } else {
            BASE64_URL_SAFE_NO_PAD.decode(segment)?
        };

        Ok(serde_json::from_slice(&payload)?)
    }

    /// Expiry in epoch milliseconds.
    pub fn expires_at_ms(&self) -> Result<u64, TokenDecodeError> {
        self.exp
            .map(|secs| secs.saturating_mul(1000))
            .ok_or(TokenDecodeError::MissingExpiry)
    }
}

/// Reads the `exp` claim of `token` and returns it in epoch milliseconds.
pub fn expires_at_ms(token: &str) -> Result<u64, TokenDecodeError> {
    IdTokenClaims::decode(token)?.expires_at_ms()
}
