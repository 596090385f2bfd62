//! # StudyHub client
//!
//! `studyhub` is the client-side half of the StudyHub study platform: an
//! authenticated REST client plus the session lifecycle around it.
//!
//! ## Session lifecycle
//!
//! - **Session Store** ([`session::SessionStore`]) keeps the bearer token and the
//!   user record together under the `auth_token` / `user_info` keys. A token
//!   without a user (or the reverse) is never a valid persisted state; such data
//!   is purged on restore.
//! - **Authorized Transport** ([`api::ApiClient`]) reads the store on every
//!   dispatch and attaches `Authorization: Bearer <token>` when a token exists.
//!   A `401` clears the store and reports [`ApiError::SessionExpired`]; a `403`
//!   reports [`ApiError::Forbidden`] and keeps the session.
//! - **Auth Operations** ([`auth::Auth`]) implement login, registration,
//!   password change, account removal and logout on top of the transport.
//! - **Auth State Controller** ([`auth::AuthStateHandle`]) publishes
//!   `{user, is_loading, is_authenticated}` over a `tokio::sync::watch` channel
//!   for whatever UI sits on top.
//!
//! ## Content services
//!
//! [`services`] holds typed wrappers for the notes, notices, questions,
//! results, solutions, subjects, community and admin-user endpoints. Upload
//! endpoints use the multipart profile of the same transport.
//!
//! Tokens and passwords travel as `secrecy::SecretString` and are never logged.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod services;
pub mod session;

pub use self::config::ClientConfig;
pub use self::error::ApiError;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
