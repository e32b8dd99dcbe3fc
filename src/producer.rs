use anyhow::Result;

use crate::message::Message;
use crate::metadata::RequestContext;

/// Port for handing messages to a broker
///
/// Implementations must tolerate concurrent `produce` calls: the only
/// state shared between calls is the underlying client connection.
#[async_trait::async_trait]
pub trait MessageProducer: Send + Sync {
    /// Hand one message to the broker.
    ///
    /// Errors are broker/transport specific and returned as produced by
    /// the client; callers must not expect them to be classified.
    async fn produce(&self, ctx: &RequestContext, message: &Message) -> Result<()>;

    /// Release broker resources. Calling it more than once is harmless.
    async fn close(&self);
}
