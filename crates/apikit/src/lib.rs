//! Declarative HTTP request pipeline
//!
//! An [`Endpoint`] describes one API call. A [`NetworkClient`] turns it into a
//! wire request (default headers, endpoint headers, then the `Authorization`
//! header resolved from an [`AuthProvider`]), dispatches it through a
//! [`Transport`], validates the status code and decodes the body. Every
//! failure surfaces as exactly one [`NetworkError`] variant.
//!
//! # Example
//!
//! ```no_run
//! use apikit::{ClientConfiguration, Endpoint, NetworkClient, NetworkError, StaticToken};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! async fn example() -> Result<User, NetworkError> {
//!     let configuration = ClientConfiguration::parse("https://api.example.com/v1")?
//!         .with_default_header("Accept", "application/json");
//!     let client = NetworkClient::new(configuration)?.auth_provider(StaticToken::bearer("token"));
//!
//!     client.request(&Endpoint::get("users/1"), None).await
//! }
//! ```

mod auth;
mod backends;
mod client;
mod config;
mod decode;
mod encoding;
mod endpoint;
mod error;
mod headers;
mod logger;
mod request;
mod response;
mod settings;
mod transport;

pub use auth::{AuthProvider, NoAuth, StaticToken};
#[cfg(feature = "reqwest")]
pub use backends::ReqwestTransport;
pub use client::{DefaultTransport, NetworkClient};
pub use config::{ClientConfiguration, DEFAULT_TIMEOUT};
pub use decode::{Decoder, FnDecoder, JsonDecoder, NonEmpty, RawDecoder};
pub use encoding::ParameterEncoding;
pub use endpoint::{Endpoint, HttpMethod};
pub use error::{BoxError, EncodingError, NetworkError, TransportError};
pub use headers::{Headers, AUTHORIZATION, CONTENT_TYPE};
pub use logger::{NoopLogger, ResponseLogger, TracingLogger};
pub use request::{build as build_request, resolve_url, QueryParams, WireRequest};
pub use response::{validate, WireResponse};
pub use settings::{Settings, SettingsError, ENV_BASE_URL, ENV_TIMEOUT_SECS};
pub use transport::Transport;
