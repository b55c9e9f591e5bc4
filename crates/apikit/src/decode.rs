//! Response body decoders

use std::convert::Infallible;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

/// Turns validated response bytes into a value of type `T`
pub trait Decoder<T> {
    /// Error raised when the bytes do not describe a `T`
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode `body`
    fn decode(&self, body: &[u8]) -> Result<T, Self::Error>;

    /// Whether an empty body must be rejected with
    /// [`crate::NetworkError::NoData`] before decoding is attempted
    fn requires_body(&self) -> bool {
        false
    }
}

/// Decodes JSON with `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl<T: DeserializeOwned> Decoder<T> for JsonDecoder {
    type Error = serde_json::Error;

    fn decode(&self, body: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(body)
    }
}

/// Returns the body bytes unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct RawDecoder;

impl Decoder<Vec<u8>> for RawDecoder {
    type Error = Infallible;

    fn decode(&self, body: &[u8]) -> Result<Vec<u8>, Self::Error> {
        Ok(body.to_vec())
    }
}

/// Wraps a decoder and rejects empty bodies with `NoData`
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmpty<D>(pub D);

impl<T, D: Decoder<T>> Decoder<T> for NonEmpty<D> {
    type Error = D::Error;

    fn decode(&self, body: &[u8]) -> Result<T, Self::Error> {
        self.0.decode(body)
    }

    fn requires_body(&self) -> bool {
        true
    }
}

/// Decoder built from a closure
pub struct FnDecoder<F, T> {
    decode: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> std::fmt::Debug for FnDecoder<F, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDecoder").finish_non_exhaustive()
    }
}

impl<F, T, E> FnDecoder<F, T>
where
    F: Fn(&[u8]) -> Result<T, E>,
{
    /// Wrap `decode`
    pub fn new(decode: F) -> Self {
        Self {
            decode,
            _marker: PhantomData,
        }
    }
}

impl<F, T, E> Decoder<T> for FnDecoder<F, T>
where
    F: Fn(&[u8]) -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn decode(&self, body: &[u8]) -> Result<T, Self::Error> {
        (self.decode)(body)
    }
}
