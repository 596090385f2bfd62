//! Client wrappers for the userinfo endpoints. Credentials go out as query
//! parameters on registration and password change because that is what the
//! API expects; the transport never logs URLs with their query strings.

use secrecy::{ExposeSecret, SecretString};

use crate::{
    api::{Ack, ApiClient, ApiRequest, ApiResponse},
    auth::types::{LoginData, LoginRequest},
    error::ApiError,
};

pub const LOGIN_PATH: &str = "/api/userinfo/public/login";
pub const REGISTER_PATH: &str = "/api/userinfo/public/reg";
pub const CHANGE_PASSWORD_PATH: &str = "/api/userinfo/user/pwChange";
pub const REMOVE_ACCOUNT_PATH: &str = "/api/userinfo/user/removeAcc";
pub const VALIDATE_PATH: &str = "/api/userinfo/user/validate";

/// Exchanges credentials for a token and user record.
///
/// # Errors
/// Returns the transport's classified error.
pub async fn login(
    api: &ApiClient,
    request: &LoginRequest,
) -> Result<ApiResponse<LoginData>, ApiError> {
    api.send(ApiRequest::post(LOGIN_PATH).json(request)?).await
}

/// Creates an account. Does not establish a session.
///
/// # Errors
/// Returns the transport's classified error.
pub async fn register(
    api: &ApiClient,
    name: &str,
    password: &SecretString,
    email: &str,
) -> Result<Ack, ApiError> {
    let request = ApiRequest::post(REGISTER_PATH)
        .query("uName", name)
        .query("uPassword", password.expose_secret())
        .query("uEmail", email);
    api.send_ack(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn change_password(api: &ApiClient, password: &SecretString) -> Result<Ack, ApiError> {
    let request = ApiRequest::put(CHANGE_PASSWORD_PATH).query("uPassword", password.expose_secret());
    api.send_ack(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn remove_account(api: &ApiClient) -> Result<Ack, ApiError> {
    api.send_ack(ApiRequest::delete(REMOVE_ACCOUNT_PATH)).await
}

/// Server-side check that the stored token is still accepted.
///
/// # Errors
/// Returns the transport's classified error.
pub async fn validate(api: &ApiClient) -> Result<Ack, ApiError> {
    api.send_ack(ApiRequest::get(VALIDATE_PATH)).await
}
