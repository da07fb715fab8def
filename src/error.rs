//! Error types for the request pipeline.
//!
//! The failure surface is a closed set: every invocation resolves to either a
//! successful payload or exactly one [`WireError`] kind, never both and never
//! neither. The status-code rules that produce these kinds live in
//! [`crate::classify`].

use thiserror::Error;

/// Errors surfaced by the request pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The request URL could not be parsed as an absolute URL.
    #[error("invalid request URL")]
    InvalidUrl,

    /// The server answered with a status outside the handled ranges.
    #[error("request failed with status {0}")]
    RequestFailed(u16),

    /// The payload could not be decoded into the requested type.
    ///
    /// The underlying parser diagnostic is logged at the decode site and
    /// intentionally kept off the public surface; callers branch on the kind,
    /// not on parser internals.
    #[error("response decoding failed")]
    DecodingFailed,

    /// The response was successful but carried no payload bytes.
    #[error("response contained no data")]
    NoData,

    /// The server answered 401 Unauthorized.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with a 5xx status.
    #[error("server error")]
    ServerError,

    /// The transport failed before any response was obtained.
    #[error("{0}")]
    Custom(String),

    /// The transport produced an outcome that is not an HTTP response.
    #[error("unknown transport outcome")]
    Unknown,
}

/// Result type delivered by every pipeline operation.
pub type Outcome<T> = std::result::Result<T, WireError>;

impl From<url::ParseError> for WireError {
    fn from(_: url::ParseError) -> Self {
        Self::InvalidUrl
    }
}
