use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument, warn};

use crate::{
    api::Ack,
    auth::{
        client,
        types::{AuthResponse, LoginRequest},
        validation::{validate_login, validate_new_password, validate_registration},
        Auth, AuthState,
    },
    error::ApiError,
    session::Session,
};

impl Auth {
    /// Restores the stored session and leaves `Initializing`.
    ///
    /// With `revalidate`, the restored token is checked against the server
    /// first; only an authentication failure discards it. Other failures
    /// (unreachable server, missing endpoint) keep the restored session.
    #[instrument(skip(self))]
    pub async fn initialize(&self, revalidate: bool) -> AuthState {
        let Some(session) = self.store.restore() else {
            debug!("no stored session");
            self.state.resolve_initial(None);
            return self.state.snapshot();
        };

        if revalidate {
            match client::validate(&self.api).await {
                Ok(_) => debug!("stored session accepted by server"),
                Err(ApiError::SessionExpired) => {
                    // transport already cleared the store and ended the session
                    info!("stored session rejected by server");
                    return self.state.snapshot();
                }
                Err(err) => warn!("could not revalidate stored session, keeping it: {err}"),
            }
        }

        self.state.resolve_initial(Some(session.user));
        self.state.snapshot()
    }

    /// Signs in with an email handle and password.
    ///
    /// # Errors
    /// Returns `Validation` before dispatch, the transport's classified error,
    /// `MalformedResponse` when the response lacks a token or user, `Storage`
    /// when the session cannot be persisted, or `Superseded` when a newer
    /// session change completed while the call was in flight.
    #[instrument(skip_all)]
    pub async fn login(&self, handle: &str, secret: &SecretString) -> Result<Session, ApiError> {
        validate_login(handle, secret)?;

        let _pending = self.state.begin_operation();
        let epoch = self.state.epoch();

        let request = LoginRequest {
            user_name: handle.trim().to_string(),
            user_password: secret.expose_secret().to_string(),
        };

        let response = client::login(&self.api, &request).await?;
        let AuthResponse { token, user } = AuthResponse::try_from(response)?;

        self.state
            .commit_login(epoch, user.clone(), || self.store.save(&token, &user))?;

        info!(user_id = user.id, "signed in");

        Ok(Session::new(token, user))
    }

    /// Creates an account. Never touches the session; a login is required
    /// afterwards.
    ///
    /// # Errors
    /// Returns `Validation` before dispatch or the transport's classified error.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        secret: &SecretString,
        confirmation: Option<&SecretString>,
    ) -> Result<Ack, ApiError> {
        validate_registration(name, email, secret, confirmation)?;

        let _pending = self.state.begin_operation();
        let ack = client::register(&self.api, name.trim(), secret, email.trim()).await?;

        info!("registration accepted");

        Ok(ack)
    }

    /// Changes the signed-in user's password.
    ///
    /// # Errors
    /// Returns `Validation` before dispatch, `SessionExpired` without a stored
    /// session, or the transport's classified error.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        new_secret: &SecretString,
        confirmation: Option<&SecretString>,
    ) -> Result<Ack, ApiError> {
        validate_new_password(new_secret, confirmation)?;
        self.require_session()?;

        let _pending = self.state.begin_operation();
        let ack = client::change_password(&self.api, new_secret).await?;

        info!("password changed");

        Ok(ack)
    }

    /// Deletes the signed-in account and signs out locally.
    ///
    /// # Errors
    /// Returns `SessionExpired` without a stored session or the transport's
    /// classified error.
    #[instrument(skip_all)]
    pub async fn remove_account(&self) -> Result<Ack, ApiError> {
        self.require_session()?;

        let ack = {
            let _pending = self.state.begin_operation();
            client::remove_account(&self.api).await?
        };

        info!("account removed");
        self.logout();

        Ok(ack)
    }

    /// Asks the server whether the stored token is still accepted.
    ///
    /// # Errors
    /// Returns the transport's classified error.
    #[instrument(skip_all)]
    pub async fn validate_session(&self) -> Result<Ack, ApiError> {
        let _pending = self.state.begin_operation();
        client::validate(&self.api).await
    }

    /// Local, unconditional sign-out. Safe to call repeatedly.
    pub fn logout(&self) {
        if self.state.end_session(|| self.store.clear()) {
            info!("signed out");
        } else {
            debug!("logout without an active session");
        }
    }

    fn require_session(&self) -> Result<(), ApiError> {
        if self.store.token().is_some() {
            return Ok(());
        }
        warn!("operation requires a session, none stored");
        self.state.end_session(|| self.store.clear());
        Err(ApiError::SessionExpired)
    }
}
