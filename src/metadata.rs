// ============================================================================
// Request Metadata
// ============================================================================
//
// Correlation, routing and request identifiers that travel with a message
// from the HTTP boundary down to the broker adapter.
//
// ============================================================================

use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const ROUTING_ID_HEADER: &str = "x-routing-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identifiers carried by the inbound request. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub correlation_id: Option<String>,
    pub routing_id: Option<String>,
    pub request_id: Option<String>,
}

/// Metadata with every identifier filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub correlation_id: String,
    pub routing_id: String,
    pub request_id: String,
}

impl RequestMetadata {
    /// Substitute a fresh UUID v4 for every missing identifier.
    ///
    /// Absence is expected, so this never fails; generated values are not
    /// remembered between calls.
    pub fn resolve(&self) -> ResolvedMetadata {
        ResolvedMetadata {
            correlation_id: or_generate(self.correlation_id.as_deref()),
            routing_id: or_generate(self.routing_id.as_deref()),
            request_id: or_generate(self.request_id.as_deref()),
        }
    }
}

fn or_generate(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => Uuid::new_v4().to_string(),
    }
}

/// Request-scoped context handed through the production pipeline.
///
/// Cancellation needs no field here: dropping the request future aborts
/// the in-flight broker send.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub metadata: RequestMetadata,
    pub deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            metadata,
            deadline: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
