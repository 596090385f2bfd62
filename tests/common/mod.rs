#![allow(dead_code)]

use std::net::TcpListener;

use anyhow::Result;
use secrecy::SecretString;
use serde_json::{json, Value};
use studyhub::{auth::Auth, session::SessionStore, session::User, ClientConfig};
use wiremock::MockServer;

pub const TOKEN: &str = "token-abc";

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn user() -> User {
    User {
        id: 7,
        name: "John".to_string(),
        email: "john@example.com".to_string(),
        roles: vec!["Student".to_string()],
    }
}

pub fn user_json() -> Value {
    json!({"id": 7, "name": "John", "email": "john@example.com", "roles": ["Student"]})
}

pub fn auth_for(uri: &str, store: &SessionStore) -> Result<Auth> {
    Ok(Auth::new(ClientConfig::new(uri)?, store.clone())?)
}

/// Auth facade against `server`, resolved to `Anonymous`.
pub async fn anonymous(server: &MockServer) -> Result<(Auth, SessionStore)> {
    let store = SessionStore::in_memory();
    let auth = auth_for(&server.uri(), &store)?;
    auth.initialize(false).await;
    Ok((auth, store))
}

/// Auth facade against `server` with a stored session, resolved to `Authenticated`.
pub async fn signed_in(server: &MockServer) -> Result<(Auth, SessionStore)> {
    let store = SessionStore::in_memory();
    store.save(&SecretString::from(TOKEN), &user())?;
    let auth = auth_for(&server.uri(), &store)?;
    auth.initialize(false).await;
    Ok((auth, store))
}
