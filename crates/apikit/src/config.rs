//! Client configuration

use std::time::Duration;

use url::Url;

use crate::error::NetworkError;
use crate::headers::Headers;

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every call made through one [`crate::NetworkClient`]
///
/// Supplied once at construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    base_url: Url,
    default_headers: Headers,
    timeout: Duration,
}

impl ClientConfiguration {
    /// Create a configuration for `base_url` with no default headers
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            default_headers: Headers::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parse `base_url` and create a configuration for it
    pub fn parse(base_url: &str) -> Result<Self, NetworkError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            tracing::warn!("Invalid base URL {}: {}", base_url, err);
            NetworkError::InvalidUrl
        })?;
        Ok(Self::new(base_url))
    }

    /// Add a header sent with every request
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Replace the default headers
    pub fn with_default_headers(mut self, headers: Headers) -> Self {
        self.default_headers = headers;
        self
    }

    /// Set the per request timeout enforced by the transport
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL every endpoint path is joined to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers sent with every request
    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Per request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
