use serde::Deserialize;

use crate::refresh::ProviderError;

/// Errors talking to the Firebase secure-token service.
#[derive(Debug, thiserror::Error)]
pub enum SecureTokenError {
    /// The request could not be sent or no response arrived.
    #[error("failed to reach the secure-token service: {0}")]
    Fetch(reqwest::Error),

    /// The response body was not what the service documents.
    #[error("failed to parse secure-token response: {0}")]
    Parse(reqwest::Error),

    /// The service refused the exchange.
    #[error("secure-token service rejected the request ({status}): {code}")]
    Rejected {
        /// HTTP status of the response
        status: u16,
        /// Error code from the response body, e.g. `TOKEN_EXPIRED`
        code: String,
    },
}

/// `{"error": {"code": 400, "message": "TOKEN_EXPIRED", "status": "INVALID_ARGUMENT"}}`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub(super) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) message: String,
}

impl ErrorBody {
    /// The bare code; the service sometimes appends ` : detail`.
    pub(super) fn code(&self) -> &str {
        self.message
            .split([':', ' '])
            .next()
            .unwrap_or_default()
            .trim()
    }
}

impl From<SecureTokenError> for ProviderError {
    fn from(err: SecureTokenError) -> Self {
        let code = match &err {
            SecureTokenError::Fetch(_) => ProviderError::NETWORK_REQUEST_FAILED,
            SecureTokenError::Parse(_) => ProviderError::INTERNAL_ERROR,
            SecureTokenError::Rejected { code, .. } => match code.as_str() {
                "TOKEN_EXPIRED" | "USER_NOT_FOUND" | "USER_DISABLED" => {
                    ProviderError::USER_TOKEN_EXPIRED
                }
                "INVALID_REFRESH_TOKEN" | "INVALID_GRANT_TYPE" | "MISSING_REFRESH_TOKEN" => {
                    ProviderError::INVALID_USER_TOKEN
                }
                _ => ProviderError::INTERNAL_ERROR,
            },
        };
        ProviderError::new(code, err.to_string())
    }
}
