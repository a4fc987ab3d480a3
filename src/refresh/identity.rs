use std::future::Future;

use thiserror::Error;

/// An error reported by the identity provider, carrying its classification code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    /// Provider error code, e.g. `auth/user-token-expired`.
    pub code: String,
    /// Human readable detail.
    pub message: String,
}

impl ProviderError {
    /// The user's credential is no longer valid and they must sign in again.
    pub const USER_TOKEN_EXPIRED: &'static str = "auth/user-token-expired";
    /// The user's refresh token was rejected.
    pub const INVALID_USER_TOKEN: &'static str = "auth/invalid-user-token";
    /// The token service could not be reached.
    pub const NETWORK_REQUEST_FAILED: &'static str = "auth/network-request-failed";
    /// The token service answered with something unexpected.
    pub const INTERNAL_ERROR: &'static str = "auth/internal-error";

    /// Creates an error with the given code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> ProviderError {
        ProviderError {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the session itself is dead, as opposed to a
    /// transient failure.
    pub fn is_session_invalid(&self) -> bool {
        self.code == Self::USER_TOKEN_EXPIRED || self.code == Self::INVALID_USER_TOKEN
    }
}

/// A signed-in user as seen by the refresh coordinator.
pub trait IdentityUser: Clone + Send + Sync + 'static {
    /// Returns the user's current ID token.
    ///
    /// With `force_refresh == false` a cached token may be returned; with
    /// `true` the provider must mint a new one. The returned future must not
    /// borrow `self`.
    fn id_token(
        &self,
        force_refresh: bool,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send + 'static;
}

/// The identity provider the coordinator delegates to.
///
/// Signing out is expected to be followed by an identity-changed
/// notification carrying no user.
pub trait IdentityProvider: Send + Sync + 'static {
    /// The user handle this provider hands out.
    type User: IdentityUser;

    /// Signs the current user out.
    fn sign_out(&self) -> impl Future<Output = Result<(), ProviderError>> + Send + 'static;
}
