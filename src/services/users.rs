//! Admin user management. These endpoints require an `Admin` role server-side;
//! a non-admin session gets `Forbidden` and keeps its session.

use secrecy::{ExposeSecret, SecretString};

use crate::{
    api::{ApiClient, ApiRequest},
    auth::validation::{valid_email, valid_name, valid_password},
    error::ApiError,
    services::Envelope,
};

/// # Errors
/// Returns the transport's classified error.
pub async fn list(api: &ApiClient) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get("/api/userinfo/admin/getAll")).await
}

/// Creates a user on behalf of an admin, optionally with a role.
///
/// # Errors
/// Returns `Validation` before dispatch or the transport's classified error.
pub async fn create(
    api: &ApiClient,
    name: &str,
    password: &SecretString,
    email: &str,
    role: Option<&str>,
) -> Result<Envelope, ApiError> {
    if !valid_name(name) {
        return Err(ApiError::validation(
            "name",
            "Name must be at least 2 characters",
        ));
    }
    if !valid_email(email.trim()) {
        return Err(ApiError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    if !valid_password(password.expose_secret()) {
        return Err(ApiError::validation(
            "password",
            "Password must be at least 8 characters with at least one letter and one number",
        ));
    }

    let request = ApiRequest::post("/api/userinfo/admin/reg")
        .query("uName", name.trim())
        .query("uPassword", password.expose_secret())
        .query("uEmail", email.trim())
        .query_opt("roleName", role);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn update(
    api: &ApiClient,
    user_id: i64,
    new_password: &SecretString,
    role: Option<&str>,
) -> Result<Envelope, ApiError> {
    let request = ApiRequest::put(format!("/api/userinfo/admin/updateUserInfo/{user_id}"))
        .query("newPassword", new_password.expose_secret())
        .query_opt("roleName", role);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn remove(api: &ApiClient, user_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::delete(format!(
        "/api/userinfo/admin/removeUserAccs/{user_id}"
    )))
    .await
}

/// # Errors
/// Returns `Validation` for an empty role name or the transport's classified error.
pub async fn create_role(api: &ApiClient, role: &str) -> Result<Envelope, ApiError> {
    if role.trim().is_empty() {
        return Err(ApiError::validation("role", "Role name is required"));
    }
    api.send(ApiRequest::post("/api/userinfo/admin/addRole").query("roleName", role.trim()))
        .await
}
