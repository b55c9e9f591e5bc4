//! Authorization credential providers

use std::fmt::Debug;

use async_trait::async_trait;

/// Supplies the credential attached to auth-required endpoints
///
/// Both accessors are awaited once per call that needs authorization. Values
/// are never cached by the client, so a provider is free to refresh tokens
/// between calls.
#[async_trait]
pub trait AuthProvider: Debug + Send + Sync {
    /// Current access token
    async fn token(&self) -> Option<String>;

    /// Token type used as the `Authorization` scheme, e.g. `Bearer`
    async fn token_type(&self) -> Option<String>;
}

/// Provider used when none is configured; it never resolves a credential
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl AuthProvider for NoAuth {
    async fn token(&self) -> Option<String> {
        None
    }

    async fn token_type(&self) -> Option<String> {
        None
    }
}

/// Provider returning a fixed token
#[derive(Clone)]
pub struct StaticToken {
    token: String,
    token_type: String,
}

impl StaticToken {
    /// Fixed token with an explicit type
    pub fn new(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
        }
    }

    /// Fixed `Bearer` token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(token, "Bearer")
    }
}

impl Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[async_trait]
impl AuthProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.token.clone())
    }

    async fn token_type(&self) -> Option<String> {
        Some(self.token_type.clone())
    }
}

/// Resolve the `Authorization` header value from `provider`
///
/// Both accessors are queried; the header is only produced when both return a
/// value.
pub(crate) async fn authorization_value(provider: &dyn AuthProvider) -> Option<String> {
    let (token, token_type) = futures::join!(provider.token(), provider.token_type());
    match (token, token_type) {
        (Some(token), Some(token_type)) => Some(format!("{} {}", token_type, token)),
        _ => None,
    }
}
