//! Error types

use thiserror::Error;

/// Boxed error cause carried by [`NetworkError::Decoding`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every way a call through [`crate::NetworkClient`] can fail
///
/// Exactly one variant describes a failed call. Nothing is retried or
/// downgraded before it reaches the caller.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The target URL could not be constructed, or the transport handed back
    /// something that is not an HTTP response
    #[error("Invalid URL")]
    InvalidUrl,
    /// A non-empty body was required but none was received
    #[error("No data received")]
    NoData,
    /// The response body could not be decoded into the requested type
    #[error("Decoding error: {0}")]
    Decoding(#[source] BoxError),
    /// The server answered with a status outside of 200..=299
    #[error("HTTP error ({status}){}", body_summary(.body))]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body, `None` when the server sent no bytes
        body: Option<Vec<u8>>,
    },
    /// Transport level failure (connectivity, timeout, cancellation)
    #[error("Underlying transport error: {0}")]
    Underlying(#[from] TransportError),
    /// Authorization was required but no credential could be resolved
    #[error("Authorization error")]
    Auth,
}

fn body_summary(body: &Option<Vec<u8>>) -> String {
    match body {
        Some(bytes) => format!(" with {} byte body", bytes.len()),
        None => String::new(),
    }
}

impl NetworkError {
    /// HTTP status code for [`NetworkError::Http`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body for [`NetworkError::Http`]
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

/// Errors raised by a [`crate::Transport`]
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Client build error
    #[error("Client build error: {0}")]
    Build(String),
    /// The request was cancelled because the client shut down
    #[error("Request cancelled")]
    Cancelled,
    /// Other error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Errors raised while encoding a request body
#[derive(Debug, Error)]
pub enum EncodingError {
    /// JSON encoding failed
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    /// Form encoding failed
    #[error("Form encoding error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
}
