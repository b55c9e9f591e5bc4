//! Endpoint description

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::encoding::ParameterEncoding;
use crate::error::EncodingError;
use crate::headers::{Headers, CONTENT_TYPE};

/// HTTP method of an [`Endpoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(format!("Unknown HTTP method: {}", s)),
        }
    }
}

/// Immutable description of a single API call
///
/// Values are used verbatim by the request builder: the method is never
/// inferred from the path and the body is sent exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    method: HttpMethod,
    additional_headers: Option<Headers>,
    requires_auth: bool,
    body: Option<Vec<u8>>,
}

impl Endpoint {
    /// Create an endpoint that requires authorization and carries no body
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            additional_headers: None,
            requires_auth: true,
            body: None,
        }
    }

    /// Shorthand for a GET endpoint
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }

    /// Shorthand for a POST endpoint
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Post)
    }

    /// Shorthand for a PUT endpoint
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Put)
    }

    /// Shorthand for a PATCH endpoint
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Patch)
    }

    /// Shorthand for a DELETE endpoint
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Delete)
    }

    /// Add an endpoint specific header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers
            .get_or_insert_with(Headers::new)
            .insert(name, value);
        self
    }

    /// Replace the endpoint specific headers
    pub fn headers(mut self, headers: Headers) -> Self {
        self.additional_headers = Some(headers);
        self
    }

    /// Set whether an `Authorization` header must be resolved
    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Mark the endpoint as public
    pub fn public(self) -> Self {
        self.requires_auth(false)
    }

    /// Attach a pre-encoded body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Encode `value` with `encoding` and attach it along with its content type
    pub fn encoded_body<T>(
        self,
        value: &T,
        encoding: ParameterEncoding,
    ) -> Result<Self, EncodingError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = encoding.encode(value)?;
        Ok(self
            .header(CONTENT_TYPE, encoding.content_type())
            .body(bytes))
    }

    /// Attach `value` as a JSON body
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, EncodingError> {
        self.encoded_body(value, ParameterEncoding::Json)
    }

    /// Attach `value` as a form encoded body
    pub fn form<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, EncodingError> {
        self.encoded_body(value, ParameterEncoding::Url)
    }

    /// Path relative to the configured base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Endpoint specific headers, if any
    pub fn additional_headers(&self) -> Option<&Headers> {
        self.additional_headers.as_ref()
    }

    /// Whether the call needs an `Authorization` header
    pub fn is_auth_required(&self) -> bool {
        self.requires_auth
    }

    /// Pre-encoded body, if any
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
