//! Configuration for the Keycloak admin client.

use std::time::Duration;

use crate::error::{Error, Result};

/// Base URL used when none is configured (local Keycloak dev server).
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("keycloak-admin/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`Keycloak`](crate::Keycloak).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, including any context path such as `/auth`.
    pub base_url: String,
    /// Bearer token attached to every request, if set.
    pub token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `KEYCLOAK_URL`: server root (default: "http://localhost:8080")
    /// - `KEYCLOAK_TOKEN`: bearer token (default: unset)
    /// - `KEYCLOAK_TIMEOUT_SECS`: request timeout in seconds (default: 30, must be non-zero)
    ///
    /// Blank values for the URL and token count as unset.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("KEYCLOAK_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let token = std::env::var("KEYCLOAK_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = match std::env::var("KEYCLOAK_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|e| Error::Config(format!("invalid KEYCLOAK_TIMEOUT_SECS: {}", e)))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(Error::Config(
                "KEYCLOAK_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            token,
            request_timeout: Duration::from_secs(timeout_secs),
            ..Self::default()
        })
    }

    /// Set the server root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
