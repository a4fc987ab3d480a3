use std::future::{ready, Future};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::client::{SecureTokenClient, TokenGrant};
use crate::refresh::{IdentityProvider, IdentityUser, ProviderError};

#[derive(Debug)]
struct SessionTokens {
    id_token: String,
    refresh_token: String,
}

/// A signed-in Firebase user backed by a refresh token.
///
/// Clones share the same token pair, so a forced refresh through one clone is
/// visible through all of them.
#[derive(Clone, Debug)]
pub struct FirebaseSession {
    client: SecureTokenClient,
    user_id: Option<String>,
    tokens: Arc<Mutex<SessionTokens>>,
}

impl FirebaseSession {
    /// Wraps the result of a refresh-token exchange.
    pub fn new(client: SecureTokenClient, grant: TokenGrant) -> FirebaseSession {
        FirebaseSession {
            client,
            user_id: grant.user_id,
            tokens: Arc::new(Mutex::new(SessionTokens {
                id_token: grant.id_token,
                refresh_token: grant.refresh_token,
            })),
        }
    }

    /// Firebase UID, when the service reported one.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The refresh token the next exchange will use.
    pub fn refresh_token(&self) -> String {
        self.tokens().refresh_token.clone()
    }

    fn tokens(&self) -> MutexGuard<'_, SessionTokens> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityUser for FirebaseSession {
    fn id_token(
        &self,
        force_refresh: bool,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send + 'static {
        let session = self.clone();

        async move {
            if !force_refresh {
                return Ok(session.tokens().id_token.clone());
            }

            let refresh_token = session.refresh_token();
            let grant = session.client.exchange(&refresh_token).await?;

            let mut tokens = session.tokens();
            tokens.id_token.clone_from(&grant.id_token);
            tokens.refresh_token = grant.refresh_token;
            Ok(grant.id_token)
        }
    }
}

/// An [`IdentityProvider`] that signs users in with Firebase refresh tokens
/// and publishes identity changes on a watch channel.
///
/// Feed [`subscribe`](Self::subscribe) into
/// [`RefreshCoordinator::watch`](crate::refresh::RefreshCoordinator::watch)
/// to keep an authorization store in sync.
#[derive(Debug)]
pub struct SecureTokenProvider {
    client: SecureTokenClient,
    identity: watch::Sender<Option<FirebaseSession>>,
}

impl SecureTokenProvider {
    /// Creates a provider with nobody signed in.
    pub fn new(client: SecureTokenClient) -> SecureTokenProvider {
        let (identity, _) = watch::channel(None);
        SecureTokenProvider { client, identity }
    }

    /// Receives the current user on every sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<FirebaseSession>> {
        self.identity.subscribe()
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<FirebaseSession> {
        self.identity.borrow().clone()
    }

    /// Exchanges `refresh_token` and makes the resulting user current.
    pub async fn sign_in_with_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<FirebaseSession, ProviderError> {
        let grant = self.client.exchange(refresh_token).await?;
        let session = FirebaseSession::new(self.client.clone(), grant);
        self.identity.send_replace(Some(session.clone()));
        Ok(session)
    }
}

impl IdentityProvider for SecureTokenProvider {
    type User = FirebaseSession;

    fn sign_out(&self) -> impl Future<Output = Result<(), ProviderError>> + Send + 'static {
        self.identity.send_replace(None);
        ready(Ok(()))
    }
}
