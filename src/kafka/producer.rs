use anyhow::Result;
use anyway_config::{KafkaConfig, MetadataStrategy};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use super::client::KafkaClient;
use super::metrics;
use super::types::{CORRELATION_ID_KEY, REQUEST_ID_KEY, WireMessage};
use crate::message::Message;
use crate::metadata::RequestContext;
use crate::producer::MessageProducer;

/// Kafka-backed [`MessageProducer`]
///
/// Translates a [`Message`] into a [`WireMessage`] according to the
/// deployment's [`MetadataStrategy`] and hands it to the broker client:
/// - `ContextOverride`: key = routing id, headers = exactly
///   `correlation_id` and `request_id` (caller headers are dropped);
///   missing identifiers are replaced with fresh UUIDs
/// - `PassThrough`: key, headers and content are copied verbatim
///
/// One attempt per call; no retries, buffering or batching happen here.
pub struct KafkaMessageProducer {
    client: Arc<dyn KafkaClient>,
    strategy: MetadataStrategy,
    topic: String,
}

impl KafkaMessageProducer {
    pub fn new(client: Arc<dyn KafkaClient>, config: &KafkaConfig) -> Self {
        info!(
            topic = %config.topic,
            strategy = %config.metadata_strategy,
            "Kafka message producer ready"
        );

        Self {
            client,
            strategy: config.metadata_strategy,
            topic: config.topic.clone(),
        }
    }

    /// Build the record for `message` under the configured strategy
    pub fn to_wire(&self, ctx: &RequestContext, message: &Message) -> WireMessage {
        match self.strategy {
            MetadataStrategy::ContextOverride => {
                let resolved = ctx.metadata.resolve();
                WireMessage {
                    key: Some(resolved.routing_id),
                    headers: HashMap::from([
                        (CORRELATION_ID_KEY.to_string(), resolved.correlation_id),
                        (REQUEST_ID_KEY.to_string(), resolved.request_id),
                    ]),
                    content: message.content().clone(),
                }
            }
            MetadataStrategy::PassThrough => WireMessage {
                key: message.key().map(str::to_string),
                headers: message.headers().clone(),
                content: message.content().clone(),
            },
        }
    }
}

#[async_trait::async_trait]
impl MessageProducer for KafkaMessageProducer {
    async fn produce(&self, ctx: &RequestContext, message: &Message) -> Result<()> {
        let wire = self.to_wire(ctx, message);
        let key = wire.key.clone().unwrap_or_default();

        let start = Instant::now();
        match self.client.send(ctx, wire).await {
            Ok(()) => {
                let latency = start.elapsed();
                metrics::record_delivered(latency);

                debug!(
                    topic = %self.topic,
                    key = %key,
                    latency_ms = latency.as_millis(),
                    "Message sent to Kafka"
                );
                Ok(())
            }
            Err(e) => {
                metrics::record_failed();

                error!(
                    error = %e,
                    topic = %self.topic,
                    key = %key,
                    latency_ms = start.elapsed().as_millis(),
                    "Failed to send message to Kafka"
                );
                Err(e)
            }
        }
    }

    async fn close(&self) {
        self.client.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RequestMetadata;
    use bytes::Bytes;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Debug, thiserror::Error)]
    #[error("failed to send message to kafka")]
    struct StubSendError;

    /// Records every record it is given; fails on demand
    #[derive(Default)]
    struct StubClient {
        sent: Mutex<Vec<WireMessage>>,
        close_calls: AtomicUsize,
        fail: bool,
    }

    impl StubClient {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<WireMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl KafkaClient for StubClient {
        async fn send(&self, _ctx: &RequestContext, message: WireMessage) -> Result<()> {
            self.sent.lock().unwrap().push(message);
            if self.fail {
                return Err(StubSendError.into());
            }
            Ok(())
        }

        async fn close(&self) {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn producer(client: Arc<StubClient>, strategy: MetadataStrategy) -> KafkaMessageProducer {
        let config = KafkaConfig {
            metadata_strategy: strategy,
            ..Default::default()
        };
        KafkaMessageProducer::new(client, &config)
    }

    fn sample_message() -> Message {
        Message::new(
            Some("caller-key".to_string()),
            HashMap::from([("header1".to_string(), "value1".to_string())]),
            Bytes::from_static(b"test-content"),
        )
    }

    fn full_context() -> RequestContext {
        RequestContext::new(RequestMetadata {
            correlation_id: Some("test-correlation-id".to_string()),
            routing_id: Some("test-routing-id".to_string()),
            request_id: Some("test-request-id".to_string()),
        })
    }

    #[tokio::test]
    async fn test_produce_success() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::ContextOverride);

        let result = producer.produce(&full_context(), &sample_message()).await;

        assert!(result.is_ok());
        assert_eq!(client.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_produce_error_is_returned_unchanged() {
        let client = Arc::new(StubClient::failing());
        let producer = producer(client.clone(), MetadataStrategy::ContextOverride);

        let err = producer
            .produce(&RequestContext::default(), &sample_message())
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<StubSendError>().is_some());
        assert_eq!(err.to_string(), "failed to send message to kafka");
        assert_eq!(err.chain().count(), 1);
        assert_eq!(client.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_produce_counts_failure() {
        let client = Arc::new(StubClient::failing());
        let producer = producer(client, MetadataStrategy::PassThrough);
        let failures = metrics::PRODUCE_FAILURE_TOTAL.get();

        producer
            .produce(&RequestContext::default(), &sample_message())
            .await
            .unwrap_err();

        assert!(metrics::PRODUCE_FAILURE_TOTAL.get() > failures);
    }

    #[tokio::test]
    async fn test_context_override_uses_request_metadata() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::ContextOverride);

        producer
            .produce(&full_context(), &sample_message())
            .await
            .unwrap();

        let wire = &client.sent()[0];
        assert_eq!(wire.key.as_deref(), Some("test-routing-id"));
        assert_eq!(
            wire.headers,
            HashMap::from([
                ("correlation_id".to_string(), "test-correlation-id".to_string()),
                ("request_id".to_string(), "test-request-id".to_string()),
            ])
        );
        assert_eq!(wire.content.as_ref(), b"test-content");
    }

    #[tokio::test]
    async fn test_context_override_keeps_correlation_id() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::ContextOverride);
        let ctx = RequestContext::new(RequestMetadata {
            correlation_id: Some("abc".to_string()),
            ..Default::default()
        });

        producer.produce(&ctx, &sample_message()).await.unwrap();

        let wire = &client.sent()[0];
        assert_eq!(wire.headers.get("correlation_id").map(String::as_str), Some("abc"));
        assert!(!wire.headers.contains_key("header1"));
    }

    #[tokio::test]
    async fn test_context_override_generates_missing_routing_id() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::ContextOverride);
        let ctx = RequestContext::default();

        producer.produce(&ctx, &sample_message()).await.unwrap();
        producer.produce(&ctx, &sample_message()).await.unwrap();

        let sent = client.sent();
        let first = sent[0].key.as_deref().unwrap();
        let second = sent[1].key.as_deref().unwrap();
        assert!(Uuid::parse_str(first).is_ok());
        assert!(Uuid::parse_str(second).is_ok());
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&sent[0].headers["request_id"]).is_ok());
    }

    #[tokio::test]
    async fn test_pass_through_copies_message_verbatim() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::PassThrough);
        let message = sample_message();

        producer.produce(&full_context(), &message).await.unwrap();

        let wire = &client.sent()[0];
        assert_eq!(wire.key.as_deref(), message.key());
        assert_eq!(&wire.headers, message.headers());
        assert_eq!(&wire.content, message.content());
    }

    #[tokio::test]
    async fn test_pass_through_without_key_or_headers() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::PassThrough);

        producer
            .produce(&RequestContext::default(), &Message::from_content(Bytes::new()))
            .await
            .unwrap();

        let wire = &client.sent()[0];
        assert!(wire.key.is_none());
        assert!(wire.headers.is_empty());
        assert!(wire.content.is_empty());
    }

    #[tokio::test]
    async fn test_close_is_forwarded_once() {
        let client = Arc::new(StubClient::default());
        let producer = producer(client.clone(), MetadataStrategy::ContextOverride);

        producer.close().await;

        assert_eq!(client.close_calls.load(Ordering::SeqCst), 1);
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_produce() {
        let client = Arc::new(StubClient::default());
        let producer = Arc::new(producer(client.clone(), MetadataStrategy::ContextOverride));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let producer = producer.clone();
                tokio::spawn(async move {
                    producer
                        .produce(&RequestContext::default(), &sample_message())
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(client.sent().len(), 16);
    }
}
