use std::env;

use serde::Deserialize;
use tracing::*;

use super::error::{ErrorResponse, SecureTokenError};
use crate::LOG_TARGET;

/// Tokens returned by a successful refresh-token exchange.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
    /// Freshly minted Firebase ID token.
    pub id_token: String,
    /// Refresh token to use for the next exchange.
    pub refresh_token: String,
    /// Firebase UID of the user.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Lifetime of the ID token in seconds, as a decimal string.
    #[serde(default)]
    pub expires_in: Option<String>,
}

/// Client for Firebase's secure-token endpoint, which trades a refresh token
/// for a new ID token.
#[derive(Clone, Debug)]
pub struct SecureTokenClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl SecureTokenClient {
    pub(crate) const TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";

    /// Creates a client for the project owning `api_key`.
    ///
    /// Requests go to the Auth emulator when `FIREBASE_AUTH_EMULATOR_HOST` is set.
    pub fn new(api_key: impl Into<String>) -> SecureTokenClient {
        let emulator_host = env::var("FIREBASE_AUTH_EMULATOR_HOST").ok();
        Self::with_endpoint(api_key, Self::endpoint_for(emulator_host.as_deref()))
    }

    /// Creates a client sending requests to `endpoint` instead of Google's.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> SecureTokenClient {
        SecureTokenClient {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// The URL exchanges are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn endpoint_for(emulator_host: Option<&str>) -> String {
        match emulator_host.map(str::trim) {
            Some(host) if !host.is_empty() => {
                format!("http://{host}/securetoken.googleapis.com/v1/token")
            }
            _ => Self::TOKEN_URL.to_owned(),
        }
    }

    /// Exchanges `refresh_token` for a new ID token.
    pub async fn exchange(&self, refresh_token: &str) -> Result<TokenGrant, SecureTokenError> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(SecureTokenError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<ErrorResponse>()
                .await
                .map_err(SecureTokenError::Parse)?;
            let code = body.error.code().to_owned();
            debug!(target: LOG_TARGET, "Secure-token exchange rejected with {status}: {code}");
            return Err(SecureTokenError::Rejected {
                status: status.as_u16(),
                code,
            });
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(SecureTokenError::Parse)
    }
}
