//! Transport boundary.
//!
//! A [`Transport`] performs exactly one HTTP exchange per call and reports a
//! [`RawOutcome`]: either a well-formed response (any status code) or a
//! failure that produced no response. Nothing above this boundary touches the
//! network, which is what lets the whole pipeline run against synthetic
//! outcomes. Implementations are chosen at construction time; the bundled
//! ones are [`HttpConnector`] (reqwest-backed) and [`FixedTransport`]
//! (canned outcomes for tests and stubs).

mod fixed;
mod http;

pub use fixed::FixedTransport;
pub use http::HttpConnector;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::request::RequestDescriptor;

/// A well-formed HTTP response as seen by the classifier.
///
/// "Well-formed" means only that a status line arrived; the status may be
/// anything, including error codes. Interpreting it is the classifier's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response payload. `None` when the response carried no bytes.
    pub body: Option<Bytes>,
}

/// Failure of a transport exchange, before classification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The exchange failed with no response: connection refused, timeout,
    /// TLS failure, and similar. The message is carried to the caller.
    #[error("{0}")]
    Failed(String),
    /// The transport produced something that is not an HTTP response at all.
    #[error("malformed transport outcome")]
    Malformed,
}

/// Raw result of one transport exchange, consumed by the classifier.
pub type RawOutcome = Result<TransportResponse, TransportError>;

/// Capability interface over "perform this exchange, report what came back".
///
/// Exactly one outcome per call. Implementations must tolerate concurrent
/// calls from many in-flight requests and must not retry on their own; retry
/// policy, if any, belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange for `request`.
    async fn execute(&self, request: &RequestDescriptor) -> RawOutcome;
}
