//! Codec Module
//!
//! Converts cached values to and from the JSON payload stored inside each
//! entry. The cache itself never looks at the payload's shape.

use std::fmt;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::CacheError;

// == Codec Trait ==
/// Serialize/deserialize pair for a cached value type.
pub trait Codec<V> {
    /// Turns a value into the JSON payload written to storage.
    fn encode(&self, value: &V) -> Result<Value, CacheError>;

    /// Rebuilds a value from a stored payload, re-hydrating any typed fields.
    fn decode(&self, raw: Value) -> Result<V, CacheError>;
}

// == JSON Codec ==
/// Codec for any serde type.
///
/// Typed fields such as `chrono::DateTime<Utc>` come back as their Rust type,
/// not as the text they were stored as.
pub struct JsonCodec<V> {
    _value: PhantomData<fn() -> V>,
}

impl<V> JsonCodec<V> {
    /// Creates the codec.
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<V> Default for JsonCodec<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for JsonCodec<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for JsonCodec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonCodec")
    }
}

impl<V: Serialize + DeserializeOwned> Codec<V> for JsonCodec<V> {
    fn encode(&self, value: &V) -> Result<Value, CacheError> {
        serde_json::to_value(value).map_err(|e| CacheError::Codec(e.to_string()))
    }

    fn decode(&self, raw: Value) -> Result<V, CacheError> {
        serde_json::from_value(raw).map_err(|e| CacheError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        name: String,
        at: DateTime<Utc>,
    }

    #[test]
    fn test_json_codec_rehydrates_dates() {
        let codec = JsonCodec::<Stamped>::new();
        let original = Stamped {
            name: "x".to_string(),
            at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };

        let raw = codec.encode(&original).unwrap();
        assert!(raw["at"].is_string());

        let decoded = codec.decode(raw).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_json_codec_rejects_wrong_shape() {
        let codec = JsonCodec::<Stamped>::new();
        let err = codec.decode(serde_json::json!({"name": 5})).unwrap_err();
        assert!(matches!(err, CacheError::Codec(_)));
    }
}
