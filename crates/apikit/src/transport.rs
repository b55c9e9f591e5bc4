//! Transport abstraction

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::WireRequest;
use crate::response::WireResponse;

/// Executes wire requests
///
/// Implementations own connection handling, TLS and timeouts. The timeout in
/// [`WireRequest::timeout`] must be enforced and reported as
/// [`TransportError::Timeout`].
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    /// Execute `request` and return the full response
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        (**self).execute(request).await
    }
}
