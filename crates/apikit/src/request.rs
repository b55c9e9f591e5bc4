//! Wire request construction

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::auth::{authorization_value, AuthProvider};
use crate::config::ClientConfiguration;
use crate::endpoint::{Endpoint, HttpMethod};
use crate::error::NetworkError;
use crate::headers::{Headers, AUTHORIZATION};

/// Query parameters appended to the endpoint URL
pub type QueryParams = BTreeMap<String, String>;

/// Fully resolved request handed to a [`crate::Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// Absolute target URL, query included
    pub url: Url,
    /// HTTP method
    pub method: HttpMethod,
    /// Merged headers
    pub headers: Headers,
    /// Body bytes, sent verbatim
    pub body: Option<Vec<u8>>,
    /// Timeout the transport enforces for this request
    pub timeout: Duration,
}

/// Build the wire request for `endpoint`
///
/// Headers are merged in ascending priority: configuration defaults, then
/// endpoint headers, then the resolved `Authorization` header. When the
/// endpoint requires authorization and `auth` does not resolve both token and
/// token type, the build fails with [`NetworkError::Auth`].
pub async fn build(
    endpoint: &Endpoint,
    config: &ClientConfiguration,
    query: Option<&QueryParams>,
    auth: &dyn AuthProvider,
) -> Result<WireRequest, NetworkError> {
    let url = resolve_url(config.base_url(), endpoint.path(), query)?;

    let mut headers = config.default_headers().clone();
    if let Some(additional) = endpoint.additional_headers() {
        headers.merge(additional.iter());
    }

    if endpoint.is_auth_required() {
        let value = authorization_value(auth).await.ok_or_else(|| {
            tracing::warn!("No credential resolved for {} {}", endpoint.method(), url);
            NetworkError::Auth
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(WireRequest {
        url,
        method: endpoint.method(),
        headers,
        body: endpoint.body_bytes().map(<[u8]>::to_vec),
        timeout: config.timeout(),
    })
}

/// Join `path` onto `base` segment by segment and append `query`
///
/// Empty segments are dropped, so `"/v1/"` joined with `"/users"` yields
/// `"/v1/users"`. The query string is left untouched when `query` is empty.
pub fn resolve_url(
    base: &Url,
    path: &str,
    query: Option<&QueryParams>,
) -> Result<Url, NetworkError> {
    let mut url = base.clone();

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            tracing::warn!("Base URL {} cannot have a path", base);
            NetworkError::InvalidUrl
        })?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
    }

    if let Some(query) = query.filter(|query| !query.is_empty()) {
        url.query_pairs_mut().extend_pairs(query.iter());
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::auth::{NoAuth, StaticToken};

    fn config() -> ClientConfiguration {
        ClientConfiguration::parse("https://api.example.com/v1").expect("valid base URL")
    }

    fn base(url: &str) -> Url {
        Url::parse(url).expect("valid base URL")
    }

    #[derive(Debug)]
    struct TypeOnly;

    #[async_trait]
    impl AuthProvider for TypeOnly {
        async fn token(&self) -> Option<String> {
            None
        }

        async fn token_type(&self) -> Option<String> {
            Some("Bearer".to_string())
        }
    }

    #[test]
    fn test_segment_join() {
        let cases = [
            ("https://api.example.com/v1", "users", "https://api.example.com/v1/users"),
            ("https://api.example.com/v1/", "/users", "https://api.example.com/v1/users"),
            ("https://api.example.com", "users/1", "https://api.example.com/users/1"),
            ("https://api.example.com/v1", "//users//1/", "https://api.example.com/v1/users/1"),
            ("https://api.example.com/v1", "", "https://api.example.com/v1"),
        ];

        for (base_url, path, expected) in cases {
            let url = resolve_url(&base(base_url), path, None).expect("valid URL");
            assert_eq!(url.as_str(), expected, "{} + {}", base_url, path);
        }
    }

    #[test]
    fn test_segment_is_percent_encoded() {
        let url = resolve_url(&base("https://api.example.com"), "files/a b?c", None)
            .expect("valid URL");
        assert_eq!(url.as_str(), "https://api.example.com/files/a%20b%3Fc");
    }

    #[test]
    fn test_cannot_be_a_base() {
        let result = resolve_url(&base("mailto:someone@example.com"), "users", None);
        assert!(matches!(result, Err(NetworkError::InvalidUrl)));
    }

    #[test]
    fn test_query_is_encoded() {
        let query = QueryParams::from([("q".to_string(), "a b".to_string())]);
        let url = resolve_url(&base("https://api.example.com"), "search", Some(&query))
            .expect("valid URL");
        assert_eq!(url.as_str(), "https://api.example.com/search?q=a+b");
    }

    #[test]
    fn test_empty_query_is_omitted() {
        let url = resolve_url(
            &base("https://api.example.com"),
            "search",
            Some(&QueryParams::new()),
        )
        .expect("valid URL");
        assert_eq!(url.query(), None);
        assert!(!url.as_str().contains('?'));
    }

    #[tokio::test]
    async fn test_header_precedence() {
        let config = config()
            .with_default_header("X-App", "a")
            .with_default_header("X-Dup", "1");
        let endpoint = Endpoint::get("users")
            .header("X-Dup", "2")
            .header("X-New", "3");

        let request = build(&endpoint, &config, None, &StaticToken::bearer("t"))
            .await
            .expect("request builds");

        let expected: BTreeMap<String, String> = [
            ("X-App", "a"),
            ("X-Dup", "2"),
            ("X-New", "3"),
            ("Authorization", "Bearer t"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

        assert_eq!(request.headers.to_map(), expected);
    }

    #[tokio::test]
    async fn test_authorization_cannot_be_overridden() {
        let config = config().with_default_header("authorization", "Basic default");
        let endpoint = Endpoint::get("users").header("AUTHORIZATION", "Basic endpoint");

        let request = build(&endpoint, &config, None, &StaticToken::bearer("t"))
            .await
            .expect("request builds");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers.get(AUTHORIZATION), Some("Bearer t"));
    }

    #[tokio::test]
    async fn test_public_endpoint_skips_auth() {
        let endpoint = Endpoint::get("status").public();
        let request = build(&endpoint, &config(), None, &NoAuth)
            .await
            .expect("request builds");
        assert!(!request.headers.contains(AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_missing_provider_fails() {
        let result = build(&Endpoint::get("me"), &config(), None, &NoAuth).await;
        assert!(matches!(result, Err(NetworkError::Auth)));
    }

    #[tokio::test]
    async fn test_partial_credential_fails() {
        let result = build(&Endpoint::get("me"), &config(), None, &TypeOnly).await;
        assert!(matches!(result, Err(NetworkError::Auth)));
    }

    #[tokio::test]
    async fn test_method_body_and_timeout() {
        let config = config().with_timeout(Duration::from_secs(7));
        let endpoint = Endpoint::put("items/9").public().body(b"raw".to_vec());

        let request = build(&endpoint, &config, None, &NoAuth)
            .await
            .expect("request builds");

        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body.as_deref(), Some(&b"raw"[..]));
        assert_eq!(request.timeout, Duration::from_secs(7));
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/items/9");
    }
}
