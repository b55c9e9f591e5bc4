//! reqwest-based Transport implementation

use async_trait::async_trait;

use crate::config::ClientConfiguration;
use crate::endpoint::HttpMethod;
use crate::error::TransportError;
use crate::headers::Headers;
use crate::request::WireRequest;
use crate::response::WireResponse;
use crate::transport::Transport;

/// Idle connections kept per host by the pool
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport using the timeout of `config`
    ///
    /// Default headers are not installed on the client: they are merged into
    /// every [`WireRequest`] so that endpoint headers can override them.
    pub fn new(config: &ClientConfiguration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()?;

        Ok(Self { inner: client })
    }

    /// Create a transport from an existing reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn response_headers(headers: &reqwest::header::HeaderMap) -> Headers {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        let mut builder = self
            .inner
            .request(method(request.method), request.url.clone())
            .timeout(request.timeout);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response_headers(response.headers());
        let body = response.bytes().await?.to_vec();

        Ok(WireResponse {
            status,
            headers,
            body,
        })
    }
}
