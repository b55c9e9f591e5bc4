//! Network client

use std::fmt::Debug;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::auth::{AuthProvider, NoAuth};
use crate::config::ClientConfiguration;
use crate::decode::{Decoder, JsonDecoder, RawDecoder};
use crate::endpoint::Endpoint;
use crate::error::{NetworkError, TransportError};
use crate::logger::{NoopLogger, ResponseLogger};
use crate::request::{self, QueryParams};
use crate::response::{self, WireResponse};
use crate::transport::Transport;
#[cfg(feature = "reqwest")]
use crate::ReqwestTransport;

/// Executes [`Endpoint`]s against one API
///
/// The configuration and collaborators are fixed at construction, so a client
/// can be shared (e.g. behind an [`Arc`]) and used from many tasks at once.
/// Every call is independent: credentials are resolved per call and nothing is
/// retried or cached.
///
/// [`NetworkClient::shutdown`] cancels every call in flight, whether it is
/// still resolving credentials or waiting on the transport. Those calls, and
/// any made afterwards, fail with [`TransportError::Cancelled`] without
/// reaching the transport again. Dropping the client releases the transport.
pub struct NetworkClient<T = DefaultTransport> {
    configuration: ClientConfiguration,
    transport: T,
    auth_provider: Arc<dyn AuthProvider>,
    logger: Arc<dyn ResponseLogger>,
    shutdown: CancellationToken,
}

/// Transport used by [`NetworkClient::new`]
#[cfg(feature = "reqwest")]
pub type DefaultTransport = ReqwestTransport;
/// Transport used by [`NetworkClient::new`]
#[cfg(not(feature = "reqwest"))]
pub type DefaultTransport = Box<dyn Transport>;

impl<T: Debug> Debug for NetworkClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkClient")
            .field("configuration", &self.configuration)
            .field("transport", &self.transport)
            .field("auth_provider", &self.auth_provider)
            .field("logger", &self.logger)
            .field("shutdown", &self.shutdown.is_cancelled())
            .finish()
    }
}

#[cfg(feature = "reqwest")]
impl NetworkClient<ReqwestTransport> {
    /// Create a client with a pooled reqwest transport
    pub fn new(configuration: ClientConfiguration) -> Result<Self, NetworkError> {
        let transport = ReqwestTransport::new(&configuration)?;
        Ok(Self::with_transport(configuration, transport))
    }
}

impl<T: Transport> NetworkClient<T> {
    /// Create a client dispatching through `transport`
    pub fn with_transport(configuration: ClientConfiguration, transport: T) -> Self {
        Self {
            configuration,
            transport,
            auth_provider: Arc::new(NoAuth),
            logger: Arc::new(NoopLogger),
            shutdown: CancellationToken::new(),
        }
    }

    /// Set the provider resolving credentials for auth-required endpoints
    pub fn auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Arc::new(provider);
        self
    }

    /// Set a shared credential provider
    pub fn shared_auth_provider(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = provider;
        self
    }

    /// Set the traffic observer
    pub fn logger(mut self, logger: impl ResponseLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Set a shared traffic observer
    pub fn shared_logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Configuration the client was built with
    pub fn configuration(&self) -> &ClientConfiguration {
        &self.configuration
    }

    /// Transport the client dispatches through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `endpoint` and decode the JSON response body into `R`
    pub async fn request<R>(
        &self,
        endpoint: &Endpoint,
        query: Option<&QueryParams>,
    ) -> Result<R, NetworkError>
    where
        R: DeserializeOwned,
    {
        self.request_with(endpoint, query, &JsonDecoder).await
    }

    /// Call `endpoint` and return the validated body bytes
    pub async fn request_raw(
        &self,
        endpoint: &Endpoint,
        query: Option<&QueryParams>,
    ) -> Result<Vec<u8>, NetworkError> {
        self.request_with(endpoint, query, &RawDecoder).await
    }

    /// Call `endpoint` and decode the response body with `decoder`
    #[instrument(skip_all, fields(method = %endpoint.method(), path = endpoint.path()))]
    pub async fn request_with<R, D>(
        &self,
        endpoint: &Endpoint,
        query: Option<&QueryParams>,
        decoder: &D,
    ) -> Result<R, NetworkError>
    where
        D: Decoder<R> + ?Sized,
    {
        // Shutdown is checked first on every poll, so no request leaves a client
        // that was shut down while credentials were resolving
        let request = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => {
                tracing::debug!("Request cancelled by client shutdown");
                return Err(TransportError::Cancelled.into());
            }
            request = request::build(
                endpoint,
                &self.configuration,
                query,
                self.auth_provider.as_ref(),
            ) => request?,
        };

        self.logger.log_request(&request);

        let response = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(TransportError::Cancelled),
            result = self.transport.execute(&request) => result,
        };

        let response: WireResponse = match response {
            Ok(response) => response,
            Err(err) => {
                self.logger.log_error(&err, &request);
                return Err(NetworkError::Underlying(err));
            }
        };

        self.logger
            .log_response(Some(&response), Some(response.body.as_slice()));

        response::validate(&response)?;

        if response.body.is_empty() && decoder.requires_body() {
            return Err(NetworkError::NoData);
        }

        decoder.decode(&response.body).map_err(|err| {
            tracing::warn!("Http Response decoding error: {}", err);
            NetworkError::Decoding(Box::new(err))
        })
    }

    /// Cancel in-flight calls and reject new ones
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::debug!("Shutting down network client");
            self.shutdown.cancel();
        }
    }

    /// Whether [`NetworkClient::shutdown`] was called
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
