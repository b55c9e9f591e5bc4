//! Transport responses and status validation

use crate::error::NetworkError;
use crate::headers::Headers;

/// Response returned by a [`crate::Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Create a response without headers
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Classify `response` by status code
///
/// Any 2xx status is a success. Every other valid status becomes
/// [`NetworkError::Http`] with the body passed through untouched. A status
/// outside `100..=999` cannot come from an HTTP exchange and is reported as
/// [`NetworkError::InvalidUrl`].
pub fn validate(response: &WireResponse) -> Result<(), NetworkError> {
    if !(100..=999).contains(&response.status) {
        tracing::warn!("Response carries invalid status {}", response.status);
        return Err(NetworkError::InvalidUrl);
    }

    if response.is_success() {
        return Ok(());
    }

    Err(NetworkError::Http {
        status: response.status,
        body: (!response.body.is_empty()).then(|| response.body.clone()),
    })
}
