//! A thin, typed pipeline for one-shot HTTP requests.
//!
//! Describe the exchange as a [`RequestDescriptor`], hand it to a pluggable
//! [`Transport`], let the classifier fold the raw outcome into a closed
//! [`WireError`] taxonomy, and optionally decode the payload into your own
//! type. Both calling conventions run the same pipeline: `send`/`send_as`
//! suspend, `dispatch`/`dispatch_as` invoke a continuation.
//!
//! ```rust,no_run
//! use overwire::{Client, RequestDescriptor};
//!
//! # async fn demo() -> Result<(), overwire::WireError> {
//! let client = Client::new();
//! let request = RequestDescriptor::get("https://api.example.com/users/1")?
//!     .bearer_auth("token")
//!     .build();
//! let user: serde_json::Value = client.send_as(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every collaborator is swappable at construction time through
//! [`Client::builder`]: the transport (a canned [`FixedTransport`] runs the
//! whole pipeline without a network), the payload codec, and an optional
//! [`RequestObserver`] for tracing.

#![deny(unsafe_code)]

pub mod classify;
pub mod client;
pub mod decode;
pub mod error;
pub mod observe;
pub mod request;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use decode::{BodyDecoder, BoxError, JsonDecoder};
pub use error::{Outcome, WireError};
pub use observe::{RequestContext, RequestObserver, TracingObserver};
pub use request::{CachePolicy, DEFAULT_TIMEOUT, Method, RequestBuilder, RequestDescriptor};
pub use transport::{
    FixedTransport, HttpConnector, RawOutcome, Transport, TransportError, TransportResponse,
};
