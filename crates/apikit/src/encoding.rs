//! Request body encodings

use serde::Serialize;

use crate::error::EncodingError;

/// How a serializable value is turned into request body bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterEncoding {
    /// `application/json`
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`
    Url,
}

impl ParameterEncoding {
    /// Content type sent alongside the encoded body
    pub fn content_type(&self) -> &'static str {
        match self {
            ParameterEncoding::Json => "application/json",
            ParameterEncoding::Url => "application/x-www-form-urlencoded",
        }
    }

    /// Encode `value` into body bytes
    pub fn encode<T>(&self, value: &T) -> Result<Vec<u8>, EncodingError>
    where
        T: Serialize + ?Sized,
    {
        match self {
            ParameterEncoding::Json => Ok(serde_json::to_vec(value)?),
            ParameterEncoding::Url => Ok(serde_urlencoded::to_string(value)?.into_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_url_encoding_rejects_nested_values() {
        let mut nested = BTreeMap::new();
        nested.insert("outer", BTreeMap::from([("inner", 1)]));

        let result = ParameterEncoding::Url.encode(&nested);
        assert!(matches!(result, Err(EncodingError::Form(_))));
    }

    #[test]
    fn test_json_encoding_of_map() {
        let map = BTreeMap::from([("a", 1), ("b", 2)]);
        let bytes = ParameterEncoding::Json.encode(&map).expect("encodes");
        assert_eq!(bytes, br#"{"a":1,"b":2}"#.to_vec());
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(ParameterEncoding::default(), ParameterEncoding::Json);
        assert_eq!(
            ParameterEncoding::default().content_type(),
            "application/json"
        );
    }
}
