//! Production transport backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue};

use crate::request::{CachePolicy, Method, RequestDescriptor};

use super::{RawOutcome, Transport, TransportError, TransportResponse};

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// [`Transport`] over a shared [`reqwest::Client`].
///
/// The connector renders the descriptor faithfully: method, URL, body bytes
/// and the per-request timeout pass through unchanged. Duplicate header
/// values keep their insertion order within each name; the wire header map
/// groups names, so ordering across different names is not preserved. The
/// cache policy becomes a `Cache-Control` request directive;
/// [`CachePolicy::ProtocolDefault`] adds nothing. Cloning is cheap and shares
/// the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    client: reqwest::Client,
}

impl HttpConnector {
    /// Connector over a freshly configured default client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Connector over a caller-configured client (proxies, pools, TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpConnector {
    async fn execute(&self, request: &RequestDescriptor) -> RawOutcome {
        let headers = render_headers(request)?;
        let mut call = self
            .client
            .request(request.method().into(), request.url().clone())
            .headers(headers)
            .timeout(request.timeout());
        if let Some(body) = request.body() {
            call = call.body(body.clone());
        }

        let response = call
            .send()
            .await
            .map_err(|e| TransportError::Failed(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Failed(e.to_string()))?;
        let body = (!bytes.is_empty()).then_some(bytes);

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// Render the descriptor's ordered header list, plus the cache-policy
/// directive, into a wire header map. `append` keeps duplicates in per-name
/// order.
fn render_headers(request: &RequestDescriptor) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    for (name, value) in request.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::Failed(format!("invalid header name `{name}`: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Failed(format!("invalid header value for `{name}`: {e}")))?;
        headers.append(name, value);
    }
    if let Some(directive) = cache_directive(request.cache_policy()) {
        headers.append(CACHE_CONTROL, HeaderValue::from_static(directive));
    }
    Ok(headers)
}

/// `Cache-Control` request directive for a policy, if the policy needs one.
fn cache_directive(policy: CachePolicy) -> Option<&'static str> {
    match policy {
        CachePolicy::ProtocolDefault => None,
        CachePolicy::IgnoreCache => Some("no-cache"),
        CachePolicy::PreferCache => Some("max-stale"),
        CachePolicy::CacheOnly => Some("only-if-cached"),
    }
}
