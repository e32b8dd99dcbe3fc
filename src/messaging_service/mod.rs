// ============================================================================
// Messaging Service
// ============================================================================
//
// Application-level send operation: one delivery attempt per call through
// the injected producer port.
//
// ============================================================================

use anyhow::Result;
use std::sync::Arc;

use crate::message::Message;
use crate::metadata::RequestContext;
use crate::producer::MessageProducer;

/// Send orchestrator shared by all request handlers
#[derive(Clone)]
pub struct MessagingService {
    producer: Arc<dyn MessageProducer>,
}

impl MessagingService {
    pub fn new(producer: Arc<dyn MessageProducer>) -> Self {
        Self { producer }
    }

    /// Deliver `message` once. Failures are logged and returned as-is.
    pub async fn send(&self, ctx: &RequestContext, message: &Message) -> Result<()> {
        if let Err(e) = self.producer.produce(ctx, message).await {
            tracing::error!(error = %e, "Failed to send message");
            return Err(e);
        }
        Ok(())
    }

    /// Release the producer. Call once, after in-flight sends have finished.
    pub async fn shutdown(&self) {
        self.producer.close().await;
    }
}
