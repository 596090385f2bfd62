//! Authorized Transport: the HTTP wrapper every StudyHub call goes through.
//!
//! Each dispatch reads the session store and attaches `Authorization: Bearer`
//! when a token is present. Failure responses are classified in one place:
//!
//! - `401` clears the store, notifies the registered [`SessionObserver`] and
//!   returns [`ApiError::SessionExpired`]. If the store no longer holds the
//!   token the request was sent with, a newer session is in place; it is left
//!   alone and the call returns [`ApiError::Superseded`].
//! - `403` returns [`ApiError::Forbidden`]; the session is kept.
//! - any other non-success returns [`ApiError::RequestFailed`] with the
//!   server's `message` when it sent one.
//! - no response at all returns [`ApiError::NetworkError`].
//!
//! There are no retries and no queuing. Dropping the returned future abandons
//! the call. Response bodies and tokens are never logged.

pub mod request;
pub mod upload;

use std::fmt;
use std::sync::Arc;

use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::{
    config::ClientConfig,
    error::{ApiError, GENERIC_MESSAGE},
    session::SessionStore,
    APP_USER_AGENT,
};

pub use self::request::{ApiRequest, MultipartBody, RequestBody};
pub use self::upload::Upload;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

/// Receives the out-of-band "session expired" signal raised by the transport.
pub trait SessionObserver: Send + Sync {
    fn session_expired(&self);
}

/// Standard response envelope: `{data, message?, status?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Unwraps `data`, treating its absence as a malformed response.
    ///
    /// # Errors
    /// Returns `ApiError::MalformedResponse` when `data` is missing.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::MalformedResponse("response has no data".to_string()))
    }
}

/// Acknowledgement for calls whose payload the caller does not need.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    store: SessionStore,
    observer: Option<Arc<dyn SessionObserver>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base_url", &self.config.api_base_url())
            .field("timeout", &self.config.timeout())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a transport bound to `store`.
    ///
    /// # Errors
    /// Returns `ApiError::NetworkError` if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig, store: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|err| ApiError::NetworkError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            store,
            observer: None,
        })
    }

    /// Registers the receiver of session-expired signals.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Sends the request and decodes a JSON body.
    ///
    /// # Errors
    /// Returns the classified `ApiError` for the failure.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        response.json::<T>().await.map_err(|err| {
            let err = err.without_url();
            if err.is_decode() {
                ApiError::MalformedResponse(format!("Failed to decode response: {err}"))
            } else {
                ApiError::NetworkError(format!("Failed to read response: {err}"))
            }
        })
    }

    /// Sends the request and accepts any successful body, keeping the
    /// envelope's `message` when there is one.
    ///
    /// # Errors
    /// Returns the classified `ApiError` for the failure.
    pub async fn send_ack(&self, request: ApiRequest) -> Result<Ack, ApiError> {
        let response = self.execute(request).await?;
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty());

        Ok(Ack { message })
    }

    /// Sends the request and returns the successful raw response.
    ///
    /// # Errors
    /// Returns the classified `ApiError` for the failure.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;

        let url = self.config.build_url(&path);
        let mut builder = self.http.request(method, &url);

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        // read at dispatch time so a login or logout in between is honored
        let sent_token = self.store.token();
        if let Some(token) = &sent_token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(payload) => builder.json(&payload),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(map_request_error)?;
        debug!(status = response.status().as_u16(), "response received");

        self.classify(response, sent_token.as_ref()).await
    }

    async fn classify(
        &self,
        response: Response,
        sent_token: Option<&SecretString>,
    ) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                if self.expire_session(sent_token) {
                    warn!("authentication rejected, session cleared");
                    Err(ApiError::SessionExpired)
                } else {
                    warn!("authentication rejected for a replaced session, keeping the current one");
                    Err(ApiError::Superseded)
                }
            }
            StatusCode::FORBIDDEN => {
                warn!("permission denied");
                Err(ApiError::Forbidden)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = error_message(&body);
                error!(status = status.as_u16(), "request failed");
                Err(ApiError::RequestFailed {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Clears the session the rejected request was sent with. Returns false
    /// when the store has moved on to a different token since dispatch.
    fn expire_session(&self, sent_token: Option<&SecretString>) -> bool {
        if !same_token(self.store.token().as_ref(), sent_token) {
            return false;
        }
        self.store.clear();
        if let Some(observer) = &self.observer {
            observer.session_expired();
        }
        true
    }
}

fn same_token(current: Option<&SecretString>, sent: Option<&SecretString>) -> bool {
    match (current, sent) {
        (None, None) => true,
        (Some(current), Some(sent)) => current.expose_secret() == sent.expose_secret(),
        _ => false,
    }
}

/// Maps transport failures (no response) into `NetworkError`.
fn map_request_error(err: reqwest::Error) -> ApiError {
    // the URL can carry credentials in its query string
    let err = err.without_url();
    if err.is_timeout() {
        error!("request timed out");
        ApiError::NetworkError("Request timed out. Please try again.".to_string())
    } else {
        error!("request failed without a response: {err}");
        ApiError::NetworkError(format!("Unable to reach the server: {err}"))
    }
}

/// Picks the server-supplied message, or a sanitized body, or the generic text.
fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return GENERIC_MESSAGE.to_string();
    }

    match serde_json::from_str::<MessageBody>(trimmed) {
        Ok(parsed) => parsed
            .message
            .map(|message| sanitize(&message))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
        Err(_) if trimmed.starts_with('{') || trimmed.starts_with('[') => {
            GENERIC_MESSAGE.to_string()
        }
        Err(_) => sanitize(trimmed),
    }
}

fn sanitize(message: &str) -> String {
    message.trim().chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"message":"User already exists","status":409}"#),
            "User already exists"
        );
    }

    #[test]
    fn error_message_falls_back_to_generic() {
        assert_eq!(error_message(""), GENERIC_MESSAGE);
        assert_eq!(error_message("   "), GENERIC_MESSAGE);
        assert_eq!(error_message(r#"{"error":"boom"}"#), GENERIC_MESSAGE);
        assert_eq!(error_message(r#"{"message":"  "}"#), GENERIC_MESSAGE);
        assert_eq!(error_message("[1,2,3]"), GENERIC_MESSAGE);
    }

    #[test]
    fn error_message_truncates_plain_text() {
        let long = "x".repeat(500);
        assert_eq!(error_message(&long).len(), MAX_ERROR_CHARS);
        assert_eq!(error_message(" Bad Gateway "), "Bad Gateway");
    }

    #[test]
    fn same_token_compares_secrets() {
        let a = SecretString::from("token-a");
        let a2 = SecretString::from("token-a");
        let b = SecretString::from("token-b");
        assert!(same_token(None, None));
        assert!(same_token(Some(&a), Some(&a2)));
        assert!(!same_token(Some(&a), Some(&b)));
        assert!(!same_token(Some(&a), None));
        assert!(!same_token(None, Some(&a)));
    }

    #[test]
    fn into_data_requires_data() {
        let empty: ApiResponse<u32> = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(matches!(
            empty.into_data(),
            Err(ApiError::MalformedResponse(_))
        ));

        let full: ApiResponse<u32> = serde_json::from_str(r#"{"data":5}"#).unwrap();
        assert_eq!(full.into_data().unwrap(), 5);
    }
}
