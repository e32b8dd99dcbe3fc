use anyhow::Result;
use tracing::debug;

use super::types::WireMessage;
use crate::metadata::RequestContext;

/// Capability the adapter needs from a broker client
///
/// The client owns the wire protocol, retries and batching. It must be
/// safe to share across concurrently running requests.
#[async_trait::async_trait]
pub trait KafkaClient: Send + Sync {
    /// Send one record and wait for the broker acknowledgment.
    async fn send(&self, ctx: &RequestContext, message: WireMessage) -> Result<()>;

    /// Flush and release the connection.
    async fn close(&self);
}

/// Client used when Kafka is switched off: acknowledges without sending
pub struct DisabledKafkaClient {
    topic: String,
}

impl DisabledKafkaClient {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

#[async_trait::async_trait]
impl KafkaClient for DisabledKafkaClient {
    async fn send(&self, _ctx: &RequestContext, message: WireMessage) -> Result<()> {
        debug!(
            topic = %self.topic,
            key = message.key.as_deref().unwrap_or_default(),
            bytes = message.content.len(),
            "Kafka disabled - message NOT sent"
        );
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(feature = "kafka")]
pub use rdkafka_client::RdKafkaClient;

#[cfg(feature = "kafka")]
mod rdkafka_client {
    use anyhow::{Context, Result};
    use anyway_config::KafkaConfig;
    use rdkafka::message::{Header, OwnedHeaders};
    use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
    use rdkafka::util::Timeout;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tracing::{debug, error, info, warn};

    use super::KafkaClient;
    use crate::kafka::config::create_client_config;
    use crate::kafka::types::WireMessage;
    use crate::metadata::RequestContext;

    /// Broker client backed by librdkafka's `FutureProducer`
    ///
    /// Configured for at-least-once delivery (`acks=all`, idempotence on
    /// by default); librdkafka retries internally until
    /// `message.timeout.ms` expires.
    pub struct RdKafkaClient {
        producer: Arc<FutureProducer>,
        topic: String,
        send_timeout: Duration,
        flush_timeout: Duration,
        closed: AtomicBool,
    }

    impl RdKafkaClient {
        pub fn new(config: &KafkaConfig) -> Result<Self> {
            info!("Initializing Kafka producer...");

            let producer: FutureProducer = create_client_config(config)?
                .create()
                .context("Failed to create Kafka producer")?;

            info!(
                brokers = %config.brokers,
                "Kafka producer initialized for topic '{}'",
                config.topic
            );

            Ok(Self {
                producer: Arc::new(producer),
                topic: config.topic.clone(),
                send_timeout: Duration::from_millis(config.producer_send_timeout_ms),
                flush_timeout: Duration::from_millis(config.producer_flush_timeout_ms),
                closed: AtomicBool::new(false),
            })
        }

        /// Enqueue timeout: the configured bound, shortened by the request deadline.
        /// The deadline also bounds the wait for the acknowledgment in `send`.
        fn queue_timeout(&self, ctx: &RequestContext) -> Duration {
            match ctx.remaining() {
                Some(remaining) => remaining.min(self.send_timeout),
                None => self.send_timeout,
            }
        }
    }

    #[async_trait::async_trait]
    impl KafkaClient for RdKafkaClient {
        async fn send(&self, ctx: &RequestContext, message: WireMessage) -> Result<()> {
            if self.closed.load(Ordering::SeqCst) {
                anyhow::bail!("Kafka producer is closed");
            }

            let headers = message
                .headers
                .iter()
                .fold(OwnedHeaders::new(), |headers, (key, value)| {
                    headers.insert(Header {
                        key: key.as_str(),
                        value: Some(value.as_str()),
                    })
                });

            let mut record = FutureRecord::<str, [u8]>::to(&self.topic)
                .payload(message.content.as_ref())
                .headers(headers);
            if let Some(key) = message.key.as_deref() {
                record = record.key(key);
            }

            let delivery = self
                .producer
                .send(record, Timeout::After(self.queue_timeout(ctx)));
            let outcome = match ctx.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, delivery).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        anyhow::bail!("Kafka send failed: request deadline exceeded")
                    }
                },
                None => delivery.await,
            };

            match outcome {
                Ok((partition, offset)) => {
                    debug!(
                        partition = partition,
                        offset = offset,
                        topic = %self.topic,
                        "Record acknowledged by Kafka"
                    );
                    Ok(())
                }
                Err((kafka_err, _)) => Err(anyhow::anyhow!("Kafka send failed: {}", kafka_err)),
            }
        }

        async fn close(&self) {
            if self.closed.swap(true, Ordering::SeqCst) {
                return;
            }

            info!("Flushing Kafka producer (timeout: {:?})", self.flush_timeout);

            let producer = Arc::clone(&self.producer);
            let timeout = self.flush_timeout;
            match tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
                .await
            {
                Ok(Ok(())) => info!("Kafka producer flushed successfully"),
                Ok(Err(e)) => warn!(error = %e, "Failed to flush Kafka producer"),
                Err(e) => error!(error = %e, "Kafka flush task panicked"),
            }
        }
    }

}
