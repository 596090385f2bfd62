//! Session Store: the sole source of truth for "is a user logged in".
//!
//! The token and the serialized user are written and removed together. Any
//! state where only one of them is present, or where the user record does not
//! parse, is treated as corrupt and purged on [`SessionStore::restore`].

pub mod storage;

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;

pub use self::storage::{FileStorage, MemoryStorage, Storage, StorageError};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the JSON-encoded user record.
pub const USER_KEY: &str = "user_info";

/// The authenticated principal as the API reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    /// Role assumed when the server assigns none.
    pub const BASE_ROLE: &'static str = "Student";

    /// Fills in the base role when the role set is empty.
    #[must_use]
    pub fn with_default_role(mut self) -> Self {
        self.roles.retain(|role| !role.trim().is_empty());
        if self.roles.is_empty() {
            self.roles.push(Self::BASE_ROLE.to_string());
        }
        self
    }

    /// Case-insensitive role check, e.g. `has_role("admin")`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role("Admin")
    }
}

/// Token and user, always held together.
#[derive(Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: User,
}

impl Session {
    #[must_use]
    pub fn new(token: SecretString, user: User) -> Self {
        Self { token, user }
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.token.expose_secret() == other.token.expose_secret() && self.user == other.user
    }
}

impl Eq for Session {}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Persist token and user in a single storage batch.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` for an empty token and `ApiError::Storage`
    /// if the backend cannot be written.
    pub fn save(&self, token: &SecretString, user: &User) -> Result<(), ApiError> {
        if token.expose_secret().trim().is_empty() {
            return Err(ApiError::validation("token", "token must not be empty"));
        }

        let user_json = serde_json::to_string(user)
            .map_err(|err| ApiError::Storage(format!("Failed to encode user: {err}")))?;

        self.storage
            .set_many(&[(TOKEN_KEY, token.expose_secret()), (USER_KEY, &user_json)])
            .map_err(|err| ApiError::Storage(err.to_string()))?;

        debug!(user_id = user.id, "session saved");

        Ok(())
    }

    /// Returns the persisted session if both entries are present and valid.
    /// Partial or corrupt data is purged. Never fails.
    #[must_use]
    pub fn restore(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);

        match (token, user) {
            (Ok(None), Ok(None)) => None,
            (Ok(Some(token)), Ok(Some(user_json))) => {
                if token.trim().is_empty() {
                    warn!("stored session has an empty token, purging");
                    self.clear();
                    return None;
                }
                match serde_json::from_str::<User>(&user_json) {
                    Ok(user) => Some(Session::new(
                        SecretString::from(token),
                        user.with_default_role(),
                    )),
                    Err(err) => {
                        warn!("stored user record is malformed, purging: {err}");
                        self.clear();
                        None
                    }
                }
            }
            (Ok(_), Ok(_)) => {
                warn!("stored session is incomplete, purging");
                self.clear();
                None
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!("failed to read stored session, purging: {err}");
                self.clear();
                None
            }
        }
    }

    /// Current bearer token, read at dispatch time by the transport.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(err) => {
                warn!("failed to read stored token: {err}");
                None
            }
        }
    }

    /// Removes both entries. Idempotent; failures are logged.
    pub fn clear(&self) {
        if let Err(err) = self.storage.remove_many(&[TOKEN_KEY, USER_KEY]) {
            warn!("failed to clear stored session: {err}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn john() -> User {
        User {
            id: 7,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            roles: vec!["Student".to_string()],
        }
    }

    #[test]
    fn save_then_restore_round_trips() {
        let store = SessionStore::in_memory();
        let token = SecretString::from("tok-123".to_string());
        store.save(&token, &john()).unwrap();

        let restored = store.restore().unwrap();
        assert_eq!(restored, Session::new(token, john()));
        assert_eq!(store.token().unwrap().expose_secret(), "tok-123");
    }

    #[test]
    fn restore_purges_partial_state() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_many(&[(TOKEN_KEY, "tok")]).unwrap();
        let store = SessionStore {
            storage: storage.clone(),
        };

        assert!(store.restore().is_none());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn restore_purges_malformed_user() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_many(&[(TOKEN_KEY, "tok"), (USER_KEY, "{\"id\":\"nope\"}")])
            .unwrap();
        let store = SessionStore {
            storage: storage.clone(),
        };

        assert!(store.restore().is_none());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn restore_fills_in_base_role() {
        let store = SessionStore::in_memory();
        let mut user = john();
        user.roles.clear();
        store
            .save(&SecretString::from("tok".to_string()), &user)
            .unwrap();

        let restored = store.restore().unwrap();
        assert_eq!(restored.user.roles, vec![User::BASE_ROLE.to_string()]);
    }

    #[test]
    fn save_rejects_empty_token() {
        let store = SessionStore::in_memory();
        let err = store
            .save(&SecretString::from("  ".to_string()), &john())
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "token", .. }));
        assert!(store.restore().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::in_memory();
        store
            .save(&SecretString::from("tok".to_string()), &john())
            .unwrap();
        store.clear();
        store.clear();
        assert!(store.restore().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn file_backed_round_trip_and_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::new(FileStorage::new(&path));
        let token = SecretString::from("file-token".to_string());
        store.save(&token, &john()).unwrap();

        let reopened = SessionStore::new(FileStorage::new(&path));
        assert_eq!(reopened.restore(), Some(Session::new(token, john())));

        std::fs::write(&path, "garbage").unwrap();
        assert!(reopened.restore().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn debug_redacts_token() {
        let session = Session::new(SecretString::from("very-secret".to_string()), john());
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn role_checks_ignore_case() {
        let mut user = john();
        user.roles = vec!["ADMIN".to_string()];
        assert!(user.is_admin());
        assert!(!john().is_admin());
    }
}
