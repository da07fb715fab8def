//! Status-code classification.
//!
//! Pure functions mapping a raw transport outcome onto the closed error
//! taxonomy. The table is total and the arms are disjoint, so every input
//! maps to exactly one outcome and classifying the same input twice gives
//! the same answer:
//!
//! | Raw outcome                      | Classified as              |
//! |----------------------------------|----------------------------|
//! | 200..=299 with a non-empty body  | `Ok(body)`                 |
//! | 200..=299, body empty or absent  | `Err(NoData)`              |
//! | 401                              | `Err(Unauthorized)`        |
//! | 500..=599                        | `Err(ServerError)`         |
//! | any other status                 | `Err(RequestFailed(code))` |
//! | transport failure with message   | `Err(Custom(message))`     |
//! | malformed transport outcome      | `Err(Unknown)`             |
//!
//! Headers play no part in classification; only the status code and body
//! presence do.

use bytes::Bytes;

use crate::error::{Outcome, WireError};
use crate::transport::{RawOutcome, TransportError, TransportResponse};

/// Classify a raw transport outcome into the public result surface.
pub fn classify(raw: RawOutcome) -> Outcome<Bytes> {
    match raw {
        Ok(response) => classify_response(response),
        Err(TransportError::Failed(message)) => Err(WireError::Custom(message)),
        Err(TransportError::Malformed) => Err(WireError::Unknown),
    }
}

/// Classify a well-formed response by status code and body presence.
pub fn classify_response(response: TransportResponse) -> Outcome<Bytes> {
    let TransportResponse { status, body, .. } = response;
    match status {
        200..=299 => match body {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(WireError::NoData),
        },
        401 => Err(WireError::Unauthorized),
        500..=599 => Err(WireError::ServerError),
        other => Err(WireError::RequestFailed(other)),
    }
}
