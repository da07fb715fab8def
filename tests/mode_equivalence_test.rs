//! The two calling conventions are observably equivalent.
//!
//! For every transport behavior, awaiting `send` and waiting on `dispatch`'s
//! continuation must deliver the same outcome; likewise for the decoding
//! variants. The conventions differ only in how the outcome is delivered.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use tokio::sync::oneshot;

use overwire::{Client, FixedTransport, Outcome, RequestDescriptor};

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u64,
    name: String,
}

fn request() -> RequestDescriptor {
    RequestDescriptor::get("https://h.test/users/1").unwrap().build()
}

async fn via_dispatch(client: &Client) -> Outcome<Bytes> {
    let (tx, rx) = oneshot::channel();
    client.dispatch(request(), move |outcome| {
        tx.send(outcome).ok();
    });
    rx.await.unwrap()
}

async fn via_dispatch_as(client: &Client) -> Outcome<User> {
    let (tx, rx) = oneshot::channel();
    client.dispatch_as::<User, _>(request(), move |outcome| {
        tx.send(outcome).ok();
    });
    rx.await.unwrap()
}

fn transports() -> Vec<FixedTransport> {
    vec![
        FixedTransport::response(200, r#"{"id":1,"name":"ada"}"#),
        FixedTransport::response(200, "not json"),
        FixedTransport::empty_response(204),
        FixedTransport::response(401, "denied"),
        FixedTransport::response(503, "down"),
        FixedTransport::response(404, "missing"),
        FixedTransport::failure("connection reset"),
        FixedTransport::malformed(),
    ]
}

#[tokio::test]
async fn raw_outcomes_match_across_conventions() {
    for transport in transports() {
        let client = Client::builder().transport(Arc::new(transport)).build();
        let suspended = client.send(&request()).await;
        let called_back = via_dispatch(&client).await;
        assert_eq!(suspended, called_back);
    }
}

#[tokio::test]
async fn decoded_outcomes_match_across_conventions() {
    for transport in transports() {
        let client = Client::builder().transport(Arc::new(transport)).build();
        let suspended: Outcome<User> = client.send_as(&request()).await;
        let called_back = via_dispatch_as(&client).await;
        assert_eq!(suspended, called_back);
    }
}

#[tokio::test]
async fn repeated_dispatches_of_one_descriptor_agree() {
    let client = Client::builder()
        .transport(Arc::new(FixedTransport::response(200, "payload")))
        .build();
    let descriptor = request();
    let first = client.send(&descriptor).await;
    let second = client.send(&descriptor).await;
    assert_eq!(first, second);
}
