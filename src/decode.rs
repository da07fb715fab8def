//! Payload decode stage.
//!
//! A successfully classified payload can optionally pass through a
//! [`BodyDecoder`] before reaching the caller. Every decoder failure is
//! reported as [`WireError::DecodingFailed`], whatever the codec: callers
//! branch on the kind, while the dropped parser diagnostic is emitted on the
//! `overwire::decode` tracing target together with the requested type name.

use serde::de::DeserializeOwned;

use crate::error::{Outcome, WireError};

/// Boxed error used at the codec boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A codec turning payload bytes into a dynamic value tree.
///
/// Decoders funnel through [`serde_json::Value`] to stay object-safe; the
/// pipeline shapes the tree into the caller's target type afterwards. The
/// default codec is [`JsonDecoder`]; any format that can produce a value
/// tree (CBOR, MessagePack, ...) can be substituted at construction time.
pub trait BodyDecoder: Send + Sync {
    /// Decode raw payload bytes into a value tree.
    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, BoxError>;
}

/// Default JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, BoxError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Run the decode stage: payload bytes through the codec, then into `T`.
///
/// Both steps collapse onto [`WireError::DecodingFailed`]; the distinction
/// between "not valid for the codec" and "valid but the wrong shape" only
/// survives in the trace.
pub(crate) fn decode_into<T: DeserializeOwned>(
    decoder: &dyn BodyDecoder,
    bytes: &[u8],
) -> Outcome<T> {
    let ty = std::any::type_name::<T>();
    let value = decoder.decode(bytes).map_err(|e| {
        tracing::debug!(target: "overwire::decode", ty, error = %e, "payload decode failed");
        WireError::DecodingFailed
    })?;
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(target: "overwire::decode", ty, error = %e, "payload does not fit the target type");
        WireError::DecodingFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: u64,
        name: String,
    }

    #[test]
    fn json_payloads_decode_into_typed_values() {
        let user: User = decode_into(&JsonDecoder, br#"{"id":1,"name":"ada"}"#).unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                name: "ada".into()
            }
        );
    }

    #[test]
    fn invalid_json_collapses_to_decoding_failed() {
        let outcome: Outcome<User> = decode_into(&JsonDecoder, b"not json at all");
        assert_eq!(outcome, Err(WireError::DecodingFailed));
    }

    #[test]
    fn shape_mismatch_collapses_to_decoding_failed() {
        // Valid JSON, wrong shape for the target.
        let outcome: Outcome<User> = decode_into(&JsonDecoder, br#"{"id":"one"}"#);
        assert_eq!(outcome, Err(WireError::DecodingFailed));
    }

    #[test]
    fn substituted_codecs_feed_the_same_stage() {
        // A codec for a line-based key=value format.
        struct KvDecoder;
        impl BodyDecoder for KvDecoder {
            fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value, BoxError> {
                let text = std::str::from_utf8(bytes)?;
                let mut map = serde_json::Map::new();
                for line in text.lines() {
                    let (key, value) = line.split_once('=').ok_or("missing `=`")?;
                    map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
                }
                Ok(serde_json::Value::Object(map))
            }
        }

        #[derive(Debug, Deserialize, PartialEq)]
        struct Greeting {
            hello: String,
        }

        let greeting: Greeting = decode_into(&KvDecoder, b"hello=world").unwrap();
        assert_eq!(greeting.hello, "world");

        let outcome: Outcome<Greeting> = decode_into(&KvDecoder, b"no separator");
        assert_eq!(outcome, Err(WireError::DecodingFailed));
    }
}
