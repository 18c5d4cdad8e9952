//! Console configuration loaded from environment variables.

use std::fmt;
use std::path::PathBuf;

use axura_shared::constants::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_HTTP_PORT};

/// The single email/password pair allowed through the session gate.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

// Keep the password out of `?config` log lines.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the mock API.
    /// Env: `AXURA_API_URL`
    /// Default: `http://127.0.0.1:8080`
    pub api_url: String,

    /// Env: `AXURA_ADMIN_EMAIL`, `AXURA_ADMIN_PASSWORD`
    /// Default: `admin@axura.com` / `admin123`
    pub credentials: Credentials,

    /// Directory holding `axura.db`. `None` uses the platform data directory.
    /// Env: `AXURA_DATA_DIR`
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: format!("http://127.0.0.1:{DEFAULT_HTTP_PORT}"),
            credentials: Credentials::default(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("AXURA_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.starts_with("http://") || url.starts_with("https://") {
                config.api_url = url.to_string();
            } else {
                tracing::warn!(value = %url, "Invalid AXURA_API_URL, using default");
            }
        }

        if let Some(email) = lookup("AXURA_ADMIN_EMAIL").filter(|v| !v.is_empty()) {
            config.credentials.email = email;
        }
        if let Some(password) = lookup("AXURA_ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
            config.credentials.password = password;
        }

        if let Some(dir) = lookup("AXURA_DATA_DIR").filter(|v| !v.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        config
    }
}
