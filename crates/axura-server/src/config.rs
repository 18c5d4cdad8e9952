//! Server configuration loaded from environment variables.
//!
//! All settings have defaults so the mock API starts with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::time::Duration;

use axura_shared::constants::{
    DEFAULT_HTTP_PORT, GET_LATENCY_MS, LIST_LATENCY_MS, UPDATE_LATENCY_MS,
};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Artificial delay before answering `GET /users`.
    /// Env: `LIST_LATENCY_MS`
    /// Default: 500 ms
    pub list_latency: Duration,

    /// Artificial delay before answering `GET /users/{id}`.
    /// Env: `GET_LATENCY_MS`
    /// Default: 300 ms
    pub get_latency: Duration,

    /// Artificial delay before answering `PUT /users/{id}`.
    /// Env: `UPDATE_LATENCY_MS`
    /// Default: 500 ms
    pub update_latency: Duration,

    /// Human-readable name reported by `/health`.
    /// Env: `INSTANCE_NAME`
    /// Default: `"Axura Mock API"`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            list_latency: Duration::from_millis(LIST_LATENCY_MS),
            get_latency: Duration::from_millis(GET_LATENCY_MS),
            update_latency: Duration::from_millis(UPDATE_LATENCY_MS),
            instance_name: "Axura Mock API".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(latency) = parse_latency(&lookup, "LIST_LATENCY_MS") {
            config.list_latency = latency;
        }
        if let Some(latency) = parse_latency(&lookup, "GET_LATENCY_MS") {
            config.get_latency = latency;
        }
        if let Some(latency) = parse_latency(&lookup, "UPDATE_LATENCY_MS") {
            config.update_latency = latency;
        }

        if let Some(name) = lookup("INSTANCE_NAME") {
            config.instance_name = name;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// A configuration with every artificial delay removed.
    pub fn without_latency(mut self) -> Self {
        self.list_latency = Duration::ZERO;
        self.get_latency = Duration::ZERO;
        self.update_latency = Duration::ZERO;
        self
    }
}

fn parse_latency(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Invalid latency, using default");
            None
        }
    }
}
