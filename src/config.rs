//! Client configuration: API base URL and request timeout.
//! Values are public; do not store secrets here.

use crate::error::ApiError;
use std::time::Duration;
use url::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8081";
/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Build a config for the given base URL.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the URL is not an absolute http(s) URL.
    pub fn new(api_base_url: &str) -> Result<Self, ApiError> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|err| ApiError::validation("api_url", format!("invalid API URL: {err}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::validation(
                    "api_url",
                    format!("unsupported scheme {scheme}"),
                ))
            }
        }

        Ok(Self {
            api_base_url: trimmed.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins an API path onto the base URL.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
