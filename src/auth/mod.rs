//! Auth feature: session-changing operations plus the state controller the UI
//! observes.
//!
//! Flow overview: `initialize` restores the stored session (optionally
//! revalidating it against `/api/userinfo/user/validate`). `login` exchanges
//! credentials for `{token, user}`, persists both and moves the controller to
//! `Authenticated`. `register` only creates the account; a separate login is
//! required. `logout` is local and unconditional. Any `401` seen by the
//! transport ends the session through the same controller.

pub mod client;
mod ops;
pub mod state;
pub mod types;
pub mod validation;

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    api::ApiClient,
    config::ClientConfig,
    error::ApiError,
    session::SessionStore,
};

pub use self::state::{AuthState, AuthStateHandle, PendingGuard, SessionStatus};
pub use self::types::{AuthResponse, LoginRequest};

/// Session lifecycle facade: owns the transport, the store and the controller.
#[derive(Clone, Debug)]
pub struct Auth {
    api: ApiClient,
    store: SessionStore,
    state: AuthStateHandle,
}

impl Auth {
    /// Wires a transport to `store` and registers the controller for
    /// session-expired signals.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: SessionStore) -> Result<Self, ApiError> {
        let state = AuthStateHandle::new();
        let api = ApiClient::new(config, store.clone())?.with_observer(Arc::new(state.clone()));

        Ok(Self { api, store, state })
    }

    /// Transport for content calls; shares this session and controller.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> &AuthStateHandle {
        &self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
