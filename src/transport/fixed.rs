//! Synthetic transport with canned outcomes.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::request::RequestDescriptor;

use super::{RawOutcome, Transport, TransportError, TransportResponse};

/// A [`Transport`] that answers every call with the same preset outcome.
///
/// Swapping this in at construction exercises the full pipeline above the
/// wire: classification, decoding and observation all run unchanged. It is
/// also the only way to produce a malformed outcome on purpose.
#[derive(Debug, Clone)]
pub struct FixedTransport {
    outcome: RawOutcome,
}

impl FixedTransport {
    /// Answer every call with `status` and `body`. An empty body is reported
    /// as absent, matching what a real connector would see on the wire.
    pub fn response(status: u16, body: impl Into<Bytes>) -> Self {
        let bytes = body.into();
        Self {
            outcome: Ok(TransportResponse {
                status,
                headers: HeaderMap::new(),
                body: (!bytes.is_empty()).then_some(bytes),
            }),
        }
    }

    /// Answer every call with a bodyless response.
    pub fn empty_response(status: u16) -> Self {
        Self {
            outcome: Ok(TransportResponse {
                status,
                headers: HeaderMap::new(),
                body: None,
            }),
        }
    }

    /// Fail every call before any response is obtained.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(TransportError::Failed(message.into())),
        }
    }

    /// Produce an outcome the pipeline cannot interpret as HTTP.
    pub fn malformed() -> Self {
        Self {
            outcome: Err(TransportError::Malformed),
        }
    }
}

#[async_trait]
impl Transport for FixedTransport {
    async fn execute(&self, _request: &RequestDescriptor) -> RawOutcome {
        self.outcome.clone()
    }
}
