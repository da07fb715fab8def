//! Custom transports see the descriptor verbatim.
//!
//! The pipeline never rewrites a descriptor on its way down: whatever the
//! caller built is what the transport receives, header order and duplicates
//! included. A recording transport captures the descriptors it is handed and
//! answers with a synthetic payload, which still flows through
//! classification and decoding unchanged.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;

use overwire::{
    Client, Method, RawOutcome, RequestDescriptor, Transport, TransportResponse, WireError,
};

/// Transport that records every descriptor and replies with a canned body.
struct RecordingTransport {
    seen: Mutex<Vec<RequestDescriptor>>,
    status: u16,
    body: &'static str,
}

impl RecordingTransport {
    fn replying(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            status,
            body,
        })
    }

    fn recorded(&self) -> Vec<RequestDescriptor> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: &RequestDescriptor) -> RawOutcome {
        self.seen.lock().unwrap().push(request.clone());
        Ok(TransportResponse {
            status: self.status,
            headers: reqwest::header::HeaderMap::new(),
            body: Some(bytes::Bytes::from_static(self.body.as_bytes())),
        })
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Echo {
    ok: bool,
}

#[tokio::test]
async fn the_transport_receives_the_descriptor_unaltered() {
    let transport = RecordingTransport::replying(200, r#"{"ok":true}"#);
    let client = Client::builder().transport(transport.clone()).build();

    let descriptor = RequestDescriptor::post("https://api.example.com/things?kind=a")
        .unwrap()
        .header("x-tag", "1")
        .header("x-trace", "2")
        .header("x-tag", "3")
        .body(r#"{"payload":42}"#)
        .build();

    let echo: Echo = client.send_as(&descriptor).await.unwrap();
    assert_eq!(echo, Echo { ok: true });

    let seen = transport.recorded();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], descriptor);
    assert_eq!(seen[0].method(), Method::Post);
    assert_eq!(
        seen[0].headers(),
        &[
            ("x-tag".to_string(), "1".to_string()),
            ("x-trace".to_string(), "2".to_string()),
            ("x-tag".to_string(), "3".to_string()),
        ]
    );
}

#[tokio::test]
async fn synthetic_outcomes_are_classified_like_real_ones() {
    let transport = RecordingTransport::replying(503, "synthetic outage");
    let client = Client::builder().transport(transport.clone()).build();
    let descriptor = RequestDescriptor::get("https://api.example.com/")
        .unwrap()
        .build();

    assert_eq!(client.send(&descriptor).await, Err(WireError::ServerError));
    assert_eq!(transport.recorded().len(), 1);
}

#[tokio::test]
async fn each_invocation_reaches_the_transport_once() {
    let transport = RecordingTransport::replying(200, r#"{"ok":true}"#);
    let client = Client::builder().transport(transport.clone()).build();
    let descriptor = RequestDescriptor::get("https://api.example.com/")
        .unwrap()
        .build();

    for _ in 0..3 {
        client.send(&descriptor).await.unwrap();
    }
    assert_eq!(transport.recorded().len(), 3);
}
