use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Header Swagger UI sends the token in.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Where an API key style credential is attached to requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyLocation {
    /// Request header
    Header,
}

/// A credential registered under a security scheme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Authorization {
    /// Security scheme name.
    pub name: String,
    /// Where the value is sent.
    pub location: KeyLocation,
    /// Header carrying the value.
    pub header_name: String,
    /// Full header value.
    pub value: String,
}

impl Authorization {
    /// An `authorization: Bearer <token>` credential for `scheme`.
    pub fn bearer(scheme: impl Into<String>, token: &str) -> Authorization {
        Authorization {
            name: scheme.into(),
            location: KeyLocation::Header,
            header_name: AUTHORIZATION_HEADER.to_owned(),
            value: format!("Bearer {token}"),
        }
    }

    /// The bare token, without the `Bearer ` prefix.
    pub fn token(&self) -> &str {
        self.value.strip_prefix("Bearer ").unwrap_or(&self.value)
    }
}

/// The host UI's store of authorizations, keyed by security scheme name.
pub trait AuthorizationStore: Send + Sync + 'static {
    /// Removes whatever is stored for `scheme`.
    fn clear(&self, scheme: &str);

    /// Stores `authorization` under its scheme name.
    fn set(&self, authorization: Authorization);

    /// Clear-then-set. Implementations should make the pair appear as one
    /// transition to readers.
    fn replace(&self, authorization: Authorization) {
        self.clear(&authorization.name);
        self.set(authorization);
    }
}

/// One mutation recorded by [`InMemoryAuthorizations`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationEvent {
    /// The scheme was cleared.
    Cleared(String),
    /// A credential was stored.
    Set(Authorization),
}

#[derive(Debug, Default)]
struct Store {
    current: HashMap<String, Authorization>,
    history: Vec<AuthorizationEvent>,
}

/// A process-local [`AuthorizationStore`] that also keeps a log of changes.
///
/// Clones share the same underlying store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAuthorizations {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryAuthorizations {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The credential currently stored for `scheme`.
    pub fn get(&self, scheme: &str) -> Option<Authorization> {
        self.lock().current.get(scheme).cloned()
    }

    /// Every mutation so far, oldest first.
    pub fn history(&self) -> Vec<AuthorizationEvent> {
        self.lock().history.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuthorizationStore for InMemoryAuthorizations {
    fn clear(&self, scheme: &str) {
        let mut store = self.lock();
        store.current.remove(scheme);
        store.history.push(AuthorizationEvent::Cleared(scheme.to_owned()));
    }

    fn set(&self, authorization: Authorization) {
        let mut store = self.lock();
        store
            .current
            .insert(authorization.name.clone(), authorization.clone());
        store.history.push(AuthorizationEvent::Set(authorization));
    }

    fn replace(&self, authorization: Authorization) {
        // Single lock so no reader sees the cleared state in between.
        let mut store = self.lock();
        store.current.remove(&authorization.name);
        store
            .history
            .push(AuthorizationEvent::Cleared(authorization.name.clone()));
        store
            .current
            .insert(authorization.name.clone(), authorization.clone());
        store.history.push(AuthorizationEvent::Set(authorization));
    }
}
