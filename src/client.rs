//! Request pipeline facade.
//!
//! [`Client`] composes the three stages behind two calling conventions that
//! share one execution path: transport, then classification, then the
//! optional decode. The suspending methods ([`send`], [`send_as`]) await the
//! outcome in place; the callback methods ([`dispatch`], [`dispatch_as`])
//! run the same future on the ambient Tokio runtime and hand the outcome to
//! a continuation. For a fixed descriptor and transport behavior the two
//! conventions produce identical outcomes.
//!
//! [`send`]: Client::send
//! [`send_as`]: Client::send_as
//! [`dispatch`]: Client::dispatch
//! [`dispatch_as`]: Client::dispatch_as

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::classify;
use crate::decode::{self, BodyDecoder, JsonDecoder};
use crate::error::Outcome;
use crate::observe::{RequestContext, RequestObserver};
use crate::request::RequestDescriptor;
use crate::transport::{HttpConnector, Transport};

/// The request pipeline: one transport exchange per invocation, one outcome.
///
/// Cloning is cheap; clones share the transport, decoder and observer. The
/// client keeps no per-request state, so one instance serves any number of
/// concurrent invocations.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn BodyDecoder>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl Client {
    /// Client over the default reqwest connector and JSON decoder, with no
    /// observer attached.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Dispatch `request` and suspend until its classified outcome is
    /// available. Success is the raw payload bytes; no decode runs.
    pub async fn send(&self, request: &RequestDescriptor) -> Outcome<Bytes> {
        let ctx = RequestContext::for_request(request);
        self.execute_classified(&ctx, request).await
    }

    /// Like [`send`](Client::send), with the payload decoded into `T`.
    ///
    /// Classification failures pass through unchanged; the decode stage only
    /// ever sees a successful payload.
    pub async fn send_as<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> Outcome<T> {
        let ctx = RequestContext::for_request(request);
        let bytes = self.execute_classified(&ctx, request).await?;
        let ty = std::any::type_name::<T>();
        let decoded = decode::decode_into::<T>(self.decoder.as_ref(), &bytes);
        self.observe(|observer| observer.on_decoded(&ctx, ty, decoded.as_ref().map(|_| ())));
        decoded
    }

    /// Callback convention of [`send`](Client::send): run the pipeline on
    /// the ambient Tokio runtime and invoke `on_complete` exactly once with
    /// the outcome, for success and failure alike.
    ///
    /// Must be called from within a Tokio runtime. The continuation runs on
    /// a runtime worker, not on the dispatching thread.
    pub fn dispatch<F>(&self, request: RequestDescriptor, on_complete: F)
    where
        F: FnOnce(Outcome<Bytes>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            on_complete(client.send(&request).await);
        });
    }

    /// Callback convention of [`send_as`](Client::send_as).
    pub fn dispatch_as<T, F>(&self, request: RequestDescriptor, on_complete: F)
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            on_complete(client.send_as::<T>(&request).await);
        });
    }

    /// Shared path under both conventions: transport, then classification,
    /// with observer checkpoints around each stage.
    async fn execute_classified(
        &self,
        ctx: &RequestContext,
        request: &RequestDescriptor,
    ) -> Outcome<Bytes> {
        self.observe(|observer| observer.on_dispatch(ctx));
        let raw = self.transport.execute(request).await;
        self.observe(|observer| observer.on_raw_outcome(ctx, &raw));
        let outcome = classify::classify(raw);
        self.observe(|observer| observer.on_classified(ctx, &outcome));
        outcome
    }

    fn observe(&self, f: impl FnOnce(&dyn RequestObserver)) {
        if let Some(observer) = &self.observer {
            f(observer.as_ref());
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Client`].
///
/// Every collaborator has a default: [`HttpConnector`] as the transport,
/// [`JsonDecoder`] as the codec, and no observer.
#[derive(Default)]
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    decoder: Option<Arc<dyn BodyDecoder>>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl ClientBuilder {
    /// Select the transport: the real connector, a canned one, or anything
    /// implementing [`Transport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the payload codec.
    pub fn decoder(mut self, decoder: Arc<dyn BodyDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Attach a trace observer.
    pub fn observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Finish construction, filling in defaults for anything unset.
    pub fn build(self) -> Client {
        Client {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpConnector::new())),
            decoder: self.decoder.unwrap_or_else(|| Arc::new(JsonDecoder)),
            observer: self.observer,
        }
    }
}
