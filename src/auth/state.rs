//! Auth State Controller. Holds what the UI currently believes about the
//! session and publishes every change over a `watch` channel.
//!
//! Lifecycle: `Initializing` until the stored session has been restored, then
//! cycling between `Authenticated(user)` and `Anonymous` for the lifetime of
//! the application. An epoch counter advances on every session change; a
//! login that started under an older epoch is discarded instead of
//! overwriting the newer state.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::{api::SessionObserver, error::ApiError, session::User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Authenticated(User),
    Anonymous,
}

/// Snapshot consumed by UI code: `{user, is_loading, is_authenticated}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    status: SessionStatus,
    pending: usize,
    epoch: u64,
}

impl AuthState {
    fn initial() -> Self {
        Self {
            status: SessionStatus::Initializing,
            pending: 0,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True while initializing or while any auth operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Initializing) || self.pending > 0
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated(_))
    }
}

/// Cloneable handle to the shared auth state.
#[derive(Clone)]
pub struct AuthStateHandle {
    sender: Arc<watch::Sender<AuthState>>,
}

impl fmt::Debug for AuthStateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthStateHandle")
            .field(&*self.sender.borrow())
            .finish()
    }
}

impl Default for AuthStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateHandle {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(AuthState::initial());
        Self {
            sender: Arc::new(sender),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.sender.borrow().epoch
    }

    /// Marks an operation as in flight until the guard is dropped.
    #[must_use]
    pub fn begin_operation(&self) -> PendingGuard {
        self.sender.send_modify(|state| state.pending += 1);
        PendingGuard {
            handle: self.clone(),
        }
    }

    /// Leaves `Initializing` with the restored user, if any. A session change
    /// that already happened in the meantime wins.
    pub(crate) fn resolve_initial(&self, user: Option<User>) {
        self.sender.send_if_modified(|state| {
            if state.status != SessionStatus::Initializing {
                return false;
            }
            state.status = match user {
                Some(user) => SessionStatus::Authenticated(user),
                None => SessionStatus::Anonymous,
            };
            true
        });
    }

    /// Installs `user` if no session change happened since `epoch` was read.
    /// `persist` runs under the state lock, so it either lands together with
    /// the transition or not at all.
    ///
    /// # Errors
    /// Returns `ApiError::Superseded` for a stale epoch, or the error from `persist`.
    pub(crate) fn commit_login<F>(&self, epoch: u64, user: User, persist: F) -> Result<(), ApiError>
    where
        F: FnOnce() -> Result<(), ApiError>,
    {
        let mut outcome = Err(ApiError::Superseded);
        self.sender.send_if_modified(|state| {
            if state.epoch != epoch {
                return false;
            }
            if let Err(err) = persist() {
                outcome = Err(err);
                return false;
            }
            state.status = SessionStatus::Authenticated(user);
            state.epoch += 1;
            outcome = Ok(());
            true
        });
        outcome
    }

    /// Ends the session and advances the epoch, so logins already in flight
    /// are discarded. `clear` runs under the state lock. Returns whether a
    /// user was signed in.
    pub(crate) fn end_session<F: FnOnce()>(&self, clear: F) -> bool {
        let mut was_authenticated = false;
        self.sender.send_if_modified(|state| {
            clear();
            was_authenticated = state.is_authenticated();
            state.epoch += 1;
            let changed = state.status != SessionStatus::Anonymous;
            state.status = SessionStatus::Anonymous;
            changed
        });
        was_authenticated
    }

    fn finish_operation(&self) {
        self.sender
            .send_modify(|state| state.pending = state.pending.saturating_sub(1));
    }
}

impl SessionObserver for AuthStateHandle {
    fn session_expired(&self) {
        if self.end_session(|| {}) {
            info!("session expired, signed out");
        } else {
            debug!("session expired while not signed in");
        }
    }
}

/// Keeps `is_loading` true while alive. Dropping it, including when the
/// owning future is cancelled, ends the operation.
#[must_use]
pub struct PendingGuard {
    handle: AuthStateHandle,
}

impl fmt::Debug for PendingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingGuard")
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.handle.finish_operation();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            roles: vec!["Student".to_string()],
        }
    }

    #[test]
    fn starts_initializing_and_loading() {
        let handle = AuthStateHandle::new();
        let state = handle.snapshot();
        assert_eq!(state.status(), &SessionStatus::Initializing);
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn resolve_initial_only_once() {
        let handle = AuthStateHandle::new();
        handle.resolve_initial(Some(user()));
        assert!(handle.snapshot().is_authenticated());
        assert!(!handle.snapshot().is_loading());

        handle.resolve_initial(None);
        assert!(handle.snapshot().is_authenticated());
    }

    #[test]
    fn guard_tracks_pending_operations() {
        let handle = AuthStateHandle::new();
        handle.resolve_initial(None);

        let first = handle.begin_operation();
        let second = handle.begin_operation();
        assert!(handle.snapshot().is_loading());
        drop(first);
        assert!(handle.snapshot().is_loading());
        drop(second);
        assert!(!handle.snapshot().is_loading());
    }

    #[test]
    fn stale_login_is_rejected() {
        let handle = AuthStateHandle::new();
        handle.resolve_initial(None);
        let epoch = handle.epoch();

        handle.commit_login(epoch, user(), || Ok(())).unwrap();
        let mut persisted = false;
        let err = handle
            .commit_login(epoch, user(), || {
                persisted = true;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(err, ApiError::Superseded);
        assert!(!persisted);
    }

    #[test]
    fn logout_during_login_wins() {
        let handle = AuthStateHandle::new();
        handle.resolve_initial(None);
        let epoch = handle.epoch();

        assert!(!handle.end_session(|| {}));
        assert_eq!(
            handle.commit_login(epoch, user(), || Ok(())),
            Err(ApiError::Superseded)
        );
        assert_eq!(handle.snapshot().status(), &SessionStatus::Anonymous);
    }

    #[test]
    fn failed_persist_keeps_state() {
        let handle = AuthStateHandle::new();
        handle.resolve_initial(None);
        let err = handle
            .commit_login(handle.epoch(), user(), || {
                Err(ApiError::Storage("disk full".to_string()))
            })
            .unwrap_err();

        assert!(matches!(err, ApiError::Storage(_)));
        assert_eq!(handle.snapshot().status(), &SessionStatus::Anonymous);
    }

    #[test]
    fn end_session_is_idempotent() {
        let handle = AuthStateHandle::new();
        handle.resolve_initial(Some(user()));
        let epoch = handle.epoch();

        assert!(handle.end_session(|| {}));
        assert_eq!(handle.epoch(), epoch + 1);
        assert!(!handle.end_session(|| {}));
        assert_eq!(handle.epoch(), epoch + 2);
        assert_eq!(handle.snapshot().status(), &SessionStatus::Anonymous);
    }

    #[tokio::test]
    async fn subscribers_see_expiry() {
        let handle = AuthStateHandle::new();
        let mut receiver = handle.subscribe();
        handle.resolve_initial(Some(user()));
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_authenticated());

        handle.session_expired();
        receiver.changed().await.unwrap();
        assert!(!receiver.borrow().is_authenticated());
    }
}
