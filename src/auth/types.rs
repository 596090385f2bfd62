//! Request and response types for the userinfo endpoints. Login payloads carry
//! the plaintext password, so they must never be logged.

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{api::ApiResponse, error::ApiError, session::User};

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub user_password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_name", &"[REDACTED]")
            .field("user_password", &"[REDACTED]")
            .finish()
    }
}

/// Login `data` as it arrives on the wire; both fields are checked before use.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// A validated login result: token and user are both present.
pub struct AuthResponse {
    pub token: SecretString,
    pub user: User,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

impl TryFrom<ApiResponse<LoginData>> for AuthResponse {
    type Error = ApiError;

    fn try_from(response: ApiResponse<LoginData>) -> Result<Self, Self::Error> {
        let data = response.into_data()?;

        let token = data
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ApiError::MalformedResponse("login response has no token".to_string()))?;
        let user = data
            .user
            .ok_or_else(|| ApiError::MalformedResponse("login response has no user".to_string()))?;

        Ok(Self {
            token: SecretString::from(token),
            user: user.with_default_role(),
        })
    }
}
