use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::{
    auth::Auth,
    config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT},
    session::{storage::FileStorage, SessionStore},
};

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string())
    }
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            session_file: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Session file in use: the explicit one or `~/.studyhub/session.json`.
    ///
    /// # Errors
    /// Returns an error if no path was given and the home directory is unknown.
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => FileStorage::default_path()
                .context("could not determine the home directory, use --session-file"),
        }
    }

    /// Builds the auth facade over the file-backed session store.
    ///
    /// # Errors
    /// Returns an error if the API URL is invalid or the HTTP client cannot be built.
    pub fn connect(&self) -> Result<Auth> {
        let config = ClientConfig::new(&self.api_url)
            .with_context(|| format!("invalid API URL: {}", self.api_url))?
            .with_timeout(self.timeout);
        let store = SessionStore::new(FileStorage::new(self.session_path()?));

        Ok(Auth::new(config, store)?)
    }
}
