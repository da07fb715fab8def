//! Pipeline trace hooks.
//!
//! An observer is an optional collaborator injected at construction. Absence
//! is a valid configuration, not a degraded one: there is no hidden global
//! logger, and no hook can influence what the caller receives. The pipeline
//! invokes the hooks at fixed checkpoints, always in the same order:
//!
//! 1. [`on_dispatch`] before the descriptor is handed to the transport,
//! 2. [`on_raw_outcome`] once the transport reports back,
//! 3. [`on_classified`] after status-code classification,
//! 4. [`on_decoded`] after the decode stage, only when one was requested and
//!    the classified outcome was successful.
//!
//! [`on_dispatch`]: RequestObserver::on_dispatch
//! [`on_raw_outcome`]: RequestObserver::on_raw_outcome
//! [`on_classified`]: RequestObserver::on_classified
//! [`on_decoded`]: RequestObserver::on_decoded

use bytes::Bytes;

use crate::error::{Outcome, WireError};
use crate::request::{Method, RequestDescriptor};
use crate::transport::RawOutcome;

/// Identifying context for one pipeline invocation, passed to every hook.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique id correlating the checkpoint calls of one invocation.
    pub request_id: String,
    /// Method of the dispatched request.
    pub method: Method,
    /// Full request URL.
    pub url: String,
}

impl RequestContext {
    pub(crate) fn for_request(request: &RequestDescriptor) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            method: request.method(),
            url: request.url().to_string(),
        }
    }
}

/// Observer invoked at the pipeline's fixed checkpoints.
///
/// Hooks return nothing and must not panic; they are trace taps, not
/// interceptors. Every hook has an empty default body so implementations
/// override only the checkpoints they care about. Hooks may be called
/// concurrently from many in-flight requests.
pub trait RequestObserver: Send + Sync {
    /// The descriptor is about to be handed to the transport.
    fn on_dispatch(&self, _ctx: &RequestContext) {}

    /// The transport produced its raw outcome.
    fn on_raw_outcome(&self, _ctx: &RequestContext, _raw: &RawOutcome) {}

    /// Classification finished.
    fn on_classified(&self, _ctx: &RequestContext, _outcome: &Outcome<Bytes>) {}

    /// The decode stage finished for target type `ty`. Fires only when a
    /// decode was requested and classification had produced a payload.
    fn on_decoded(&self, _ctx: &RequestContext, _ty: &str, _result: Result<(), &WireError>) {}
}

/// Observer writing one `tracing` debug line per checkpoint, on the
/// `overwire::pipeline` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_dispatch(&self, ctx: &RequestContext) {
        tracing::debug!(
            target: "overwire::pipeline",
            id = %ctx.request_id,
            method = %ctx.method,
            url = %ctx.url,
            "dispatching request"
        );
    }

    fn on_raw_outcome(&self, ctx: &RequestContext, raw: &RawOutcome) {
        match raw {
            Ok(response) => tracing::debug!(
                target: "overwire::pipeline",
                id = %ctx.request_id,
                status = response.status,
                "transport returned a response"
            ),
            Err(error) => tracing::debug!(
                target: "overwire::pipeline",
                id = %ctx.request_id,
                error = %error,
                "transport failed"
            ),
        }
    }

    fn on_classified(&self, ctx: &RequestContext, outcome: &Outcome<Bytes>) {
        match outcome {
            Ok(payload) => tracing::debug!(
                target: "overwire::pipeline",
                id = %ctx.request_id,
                payload_len = payload.len(),
                "classified as success"
            ),
            Err(error) => tracing::debug!(
                target: "overwire::pipeline",
                id = %ctx.request_id,
                error = %error,
                "classified as failure"
            ),
        }
    }

    fn on_decoded(&self, ctx: &RequestContext, ty: &str, result: Result<(), &WireError>) {
        match result {
            Ok(()) => tracing::debug!(
                target: "overwire::pipeline",
                id = %ctx.request_id,
                ty,
                "payload decoded"
            ),
            Err(error) => tracing::debug!(
                target: "overwire::pipeline",
                id = %ctx.request_id,
                ty,
                error = %error,
                "payload decode failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn context() -> RequestContext {
        let request = RequestDescriptor::get("https://h.test/users").unwrap().build();
        RequestContext::for_request(&request)
    }

    #[test]
    fn request_ids_are_unique_per_invocation() {
        let request = RequestDescriptor::get("https://h.test/").unwrap().build();
        let first = RequestContext::for_request(&request);
        let second = RequestContext::for_request(&request);
        assert_ne!(first.request_id, second.request_id);
        assert_eq!(first.url, "https://h.test/");
        assert_eq!(first.method, Method::Get);
    }

    #[traced_test]
    #[test]
    fn tracing_observer_writes_a_line_per_checkpoint() {
        let observer = TracingObserver;
        let ctx = context();

        observer.on_dispatch(&ctx);
        observer.on_raw_outcome(&ctx, &Err(crate::transport::TransportError::Malformed));
        observer.on_classified(&ctx, &Err(WireError::Unknown));
        observer.on_decoded(&ctx, "alloc::string::String", Err(&WireError::DecodingFailed));

        assert!(logs_contain("dispatching request"));
        assert!(logs_contain("transport failed"));
        assert!(logs_contain("classified as failure"));
        assert!(logs_contain("payload decode failed"));
    }

    #[traced_test]
    #[test]
    fn tracing_observer_reports_success_checkpoints() {
        let observer = TracingObserver;
        let ctx = context();

        observer.on_classified(&ctx, &Ok(Bytes::from_static(b"payload")));
        observer.on_decoded(&ctx, "alloc::string::String", Ok(()));

        assert!(logs_contain("classified as success"));
        assert!(logs_contain("payload decoded"));
    }
}
