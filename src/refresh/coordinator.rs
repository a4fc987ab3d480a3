use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::*;

use super::authorization::{Authorization, AuthorizationStore};
use super::identity::{IdentityProvider, IdentityUser};
use super::timer::{PendingRefresh, RefreshTimer};
use crate::options::Options;
use crate::token;
use crate::LOG_TARGET;

/// Source of "now" in epoch milliseconds.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Milliseconds since the Unix epoch according to the system clock.
pub fn system_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// Computes how long to wait before refreshing a token expiring at
/// `expires_at_ms`.
///
/// Returns `None` when the refresh point has already been reached, in which
/// case the token should be refreshed right away.
pub fn refresh_delay(expires_at_ms: u64, refresh_before_ms: u64, now_ms: u64) -> Option<Duration> {
    expires_at_ms
        .saturating_sub(refresh_before_ms)
        .checked_sub(now_ms)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

/// Keeps an [`AuthorizationStore`] in sync with the current user's ID token
/// and refreshes the token before it expires.
///
/// At most one refresh timer is pending at any time: arming always cancels
/// the previous timer first. Every identity change starts a new session;
/// token fetches that complete after their session ended are discarded.
///
/// Clones share the same state. Dropping the last clone aborts the pending
/// timer.
pub struct RefreshCoordinator<P: IdentityProvider, A: AuthorizationStore> {
    inner: Arc<Inner<P, A>>,
}

impl<P: IdentityProvider, A: AuthorizationStore> Clone for RefreshCoordinator<P, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<P, A> {
    provider: P,
    store: A,
    scheme: String,
    refresh_before_ms: u64,
    clock: Clock,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    session: u64,
    next_timer_id: u64,
    timer: Option<RefreshTimer>,
}

impl<P: IdentityProvider, A: AuthorizationStore> RefreshCoordinator<P, A> {
    /// Creates a coordinator using the system clock.
    pub fn new(provider: P, store: A, options: &Options) -> Self {
        Self::with_clock(provider, store, options, Arc::new(system_now_ms))
    }

    /// Creates a coordinator reading the current time from `clock`.
    pub fn with_clock(provider: P, store: A, options: &Options, clock: Clock) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                store,
                scheme: options.security_scheme_name.clone(),
                refresh_before_ms: options.refresh_before_expiry_ms,
                clock,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// The authorization store this coordinator writes to.
    pub fn store(&self) -> &A {
        &self.inner.store
    }

    /// The identity provider this coordinator delegates to.
    pub fn provider(&self) -> &P {
        &self.inner.provider
    }

    /// The refresh currently scheduled, if any.
    pub fn pending_timer(&self) -> Option<PendingRefresh> {
        self.state().timer.as_ref().map(RefreshTimer::pending)
    }

    /// Reacts to the identity provider reporting a new user, or none.
    ///
    /// With a user, its current token is installed in the store and a refresh
    /// timer is armed. Without one, any pending timer is cancelled and the
    /// store is cleared for the configured scheme.
    pub async fn on_identity_changed(&self, user: Option<P::User>) {
        let session = self.begin_session();

        let Some(user) = user else {
            debug!(target: LOG_TARGET, scheme = %self.inner.scheme, "Signed out, clearing authorization");
            self.inner.store.clear(&self.inner.scheme);
            return;
        };

        let token = match user.id_token(false).await {
            Ok(token) => token,
            Err(err) => {
                error!(target: LOG_TARGET, "Failed to read ID token of signed-in user: {err}");
                // The previous user's token must not outlive their session.
                if self.is_current(session) {
                    self.inner.store.clear(&self.inner.scheme);
                }
                return;
            }
        };

        if !self.is_current(session) {
            return;
        }

        self.project(&token);
        self.arm_in_session(session, user).await;
    }

    /// Schedules the next proactive refresh for `user`.
    ///
    /// If the current token is already inside the refresh window the refresh
    /// happens immediately, within this call.
    pub async fn arm_refresh_timer(&self, user: P::User) {
        let session = self.state().session;
        self.arm_in_session(session, user).await;
    }

    /// Spawns a task feeding identity changes from `identity` into
    /// [`on_identity_changed`](Self::on_identity_changed).
    ///
    /// The task ends when the sender side is dropped.
    pub fn watch(&self, mut identity: watch::Receiver<Option<P::User>>) -> JoinHandle<()> {
        let coordinator = self.clone();

        tokio::spawn(async move {
            loop {
                let user = identity.borrow_and_update().clone();
                coordinator.on_identity_changed(user).await;

                if identity.changed().await.is_err() {
                    debug!(target: LOG_TARGET, "Identity channel closed");
                    break;
                }
            }
        })
    }

    async fn arm_in_session(&self, session: u64, user: P::User) {
        loop {
            self.cancel_timer();

            let token = match user.id_token(false).await {
                Ok(token) => token,
                Err(err) => {
                    warn!(target: LOG_TARGET, "Failed to read ID token, refresh not scheduled: {err}");
                    return;
                }
            };

            if !self.is_current(session) {
                return;
            }

            let expires_at_ms = match token::expires_at_ms(&token) {
                Ok(ms) => ms,
                Err(err) => {
                    warn!(target: LOG_TARGET, "Cannot read token expiry, refresh not scheduled: {err}");
                    return;
                }
            };

            let now_ms = (self.inner.clock)();
            if let Some(delay) = refresh_delay(expires_at_ms, self.inner.refresh_before_ms, now_ms) {
                self.schedule(session, user, delay, now_ms);
                return;
            }

            debug!(target: LOG_TARGET, expires_at_ms, "Token inside refresh window, refreshing now");
            if !self.force_refresh(session, &user).await {
                return;
            }
        }
    }

    fn schedule(&self, session: u64, user: P::User, delay: Duration, now_ms: u64) {
        let weak: Weak<Inner<P, A>> = Arc::downgrade(&self.inner);
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let pending = PendingRefresh {
            fire_at_ms: now_ms.saturating_add(delay_ms),
            delay,
        };

        // The lock is held until the timer is in its slot so the task cannot
        // observe an empty slot when it fires.
        let mut state = self.state();
        if state.session != session {
            return;
        }

        state.next_timer_id += 1;
        let id = state.next_timer_id;

        // Measured from arming, not from the task's first poll.
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            RefreshCoordinator { inner }.on_timer_fired(id, session, user).await;
        });

        debug!(target: LOG_TARGET, fire_at_ms = pending.fire_at_ms, "Next token refresh in {delay:?}");

        if let Some(previous) = state.timer.replace(RefreshTimer::new(id, pending, handle)) {
            previous.cancel();
        }
    }

    async fn on_timer_fired(&self, id: u64, session: u64, user: P::User) {
        {
            let mut state = self.state();
            match state.timer.take() {
                Some(timer) if timer.id == id => timer.detach(),
                other => {
                    // Superseded while waking up.
                    state.timer = other;
                    return;
                }
            }
        }

        if self.force_refresh(session, &user).await {
            self.arm_in_session(session, user).await;
        }
    }

    /// Mints a new token and installs it. Returns `true` when the caller
    /// should re-arm.
    async fn force_refresh(&self, session: u64, user: &P::User) -> bool {
        match user.id_token(true).await {
            Ok(token) => {
                if !self.is_current(session) {
                    return false;
                }
                self.project(&token);
                true
            }
            Err(err) if err.is_session_invalid() => {
                error!(target: LOG_TARGET, "Token refresh rejected, signing out: {err}");
                if self.is_current(session) {
                    if let Err(err) = self.inner.provider.sign_out().await {
                        error!(target: LOG_TARGET, "Sign-out failed: {err}");
                    }
                }
                false
            }
            Err(err) => {
                error!(target: LOG_TARGET, "Token refresh failed: {err}");
                false
            }
        }
    }

    fn project(&self, token: &str) {
        self.inner
            .store
            .replace(Authorization::bearer(self.inner.scheme.as_str(), token));
    }

    fn begin_session(&self) -> u64 {
        let mut state = self.state();
        state.session += 1;
        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
        state.session
    }

    fn cancel_timer(&self) {
        let timer = self.state().timer.take();
        if let Some(timer) = timer {
            timer.cancel();
        }
    }

    fn is_current(&self, session: u64) -> bool {
        self.state().session == session
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
