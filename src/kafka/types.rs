use bytes::Bytes;
use std::collections::HashMap;

/// Header key carrying the correlation id on produced records
pub const CORRELATION_ID_KEY: &str = "correlation_id";
/// Header key carrying the request id on produced records
pub const REQUEST_ID_KEY: &str = "request_id";

/// Record handed to the broker client
///
/// Same shape as [`crate::message::Message`]; headers may have been
/// replaced with correlation metadata depending on the propagation
/// strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    pub key: Option<String>,
    pub headers: HashMap<String, String>,
    pub content: Bytes,
}
