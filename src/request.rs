//! Request description types.
//!
//! A [`RequestDescriptor`] is an immutable value describing one HTTP
//! exchange. It is assembled through [`RequestBuilder`], which parses the URL
//! eagerly so a malformed descriptor can never reach a transport: URL failure
//! surfaces as [`WireError::InvalidUrl`] at build entry, before any network
//! activity.

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::error::{Outcome, WireError};

/// Timeout applied when the builder does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// Uppercase wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache-behavior hint carried by a request.
///
/// The pipeline never interprets this value; each transport decides how (or
/// whether) to honor it. The bundled [`HttpConnector`] maps it to a
/// `Cache-Control` request directive.
///
/// [`HttpConnector`]: crate::transport::HttpConnector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Follow standard HTTP caching semantics.
    #[default]
    ProtocolDefault,
    /// Ignore cached data and refetch from the origin.
    IgnoreCache,
    /// Accept cached data regardless of freshness, fetching only on a miss.
    PreferCache,
    /// Never touch the network; fail unless a cached copy can answer.
    CacheOnly,
}

/// Immutable description of one HTTP request.
///
/// The descriptor is owned by the caller and borrowed by the pipeline;
/// nothing downstream mutates it, so a single descriptor can be dispatched
/// any number of times. Header order, including duplicate names, is preserved
/// exactly as inserted and handed to the transport in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    url: Url,
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    cache_policy: CachePolicy,
    timeout: Duration,
}

impl RequestDescriptor {
    /// Start a request to `url`. The method defaults to GET until
    /// [`method`](RequestBuilder::method) overrides it.
    pub fn builder(url: &str) -> Outcome<RequestBuilder> {
        RequestBuilder::new(url, Method::Get)
    }

    /// Start a GET request to `url`.
    pub fn get(url: &str) -> Outcome<RequestBuilder> {
        RequestBuilder::new(url, Method::Get)
    }

    /// Start a POST request to `url`.
    pub fn post(url: &str) -> Outcome<RequestBuilder> {
        RequestBuilder::new(url, Method::Post)
    }

    /// Start a PUT request to `url`.
    pub fn put(url: &str) -> Outcome<RequestBuilder> {
        RequestBuilder::new(url, Method::Put)
    }

    /// Start a DELETE request to `url`.
    pub fn delete(url: &str) -> Outcome<RequestBuilder> {
        RequestBuilder::new(url, Method::Delete)
    }

    /// Start a PATCH request to `url`.
    pub fn patch(url: &str) -> Outcome<RequestBuilder> {
        RequestBuilder::new(url, Method::Patch)
    }

    /// Full request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Headers in insertion order. Duplicate names are distinct entries.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Request payload, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Cache-behavior hint for the transport.
    pub fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for [`RequestDescriptor`].
///
/// Obtained through [`RequestDescriptor::builder`] or the per-verb
/// constructors. URL parsing is the only fallible step; every later call is
/// infallible except
/// [`json`](RequestBuilder::json), whose serialization failure belongs to the
/// caller's payload type rather than the pipeline.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: Url,
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    cache_policy: CachePolicy,
    timeout: Duration,
}

impl RequestBuilder {
    fn new(url: &str, method: Method) -> Outcome<Self> {
        let url = Url::parse(url)?;
        if url.cannot_be_a_base() {
            return Err(WireError::InvalidUrl);
        }
        Ok(Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
            cache_policy: CachePolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the HTTP method chosen by the constructor.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a header. Repeated names accumulate in call order; nothing is
    /// replaced or merged.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append an `authorization: Bearer <token>` header.
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    /// Append a query pair to the URL, keeping any pairs already present.
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Set the raw request payload.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `payload` as the JSON request body and append a
    /// `content-type: application/json` header.
    pub fn json<T: Serialize>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(payload)?;
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.body = Some(Bytes::from(body));
        Ok(self)
    }

    /// Set the cache-behavior hint.
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Override the default 60-second timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Finish the descriptor. Infallible: every fallible step already ran.
    pub fn build(self) -> RequestDescriptor {
        RequestDescriptor {
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: self.body,
            cache_policy: self.cache_policy,
            timeout: self.timeout,
        }
    }
}
