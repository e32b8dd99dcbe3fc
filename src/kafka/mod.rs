// Kafka module for message production
//
// Translates domain messages into Kafka records and hands them to the
// broker client. Retries, batching and the wire protocol belong to the
// client (librdkafka); this module adds none of its own.

pub mod client;
#[cfg(feature = "kafka")]
pub mod config;
pub mod metrics;
pub mod producer;
pub mod types;

use anyhow::Result;
use anyway_config::KafkaConfig;
use std::sync::Arc;
use tracing::info;

// Re-export commonly used types
pub use client::{DisabledKafkaClient, KafkaClient};
#[cfg(feature = "kafka")]
pub use client::RdKafkaClient;
#[cfg(feature = "kafka")]
pub use config::create_client_config;
pub use producer::KafkaMessageProducer;
pub use types::{CORRELATION_ID_KEY, REQUEST_ID_KEY, WireMessage};

/// Build the broker client selected by the configuration.
pub fn build_client(config: &KafkaConfig) -> Result<Arc<dyn KafkaClient>> {
    if !config.enabled {
        info!("Kafka producer disabled (KAFKA_ENABLED=false)");
        return Ok(Arc::new(DisabledKafkaClient::new(&config.topic)));
    }

    connect_kafka(config)
}

#[cfg(feature = "kafka")]
fn connect_kafka(config: &KafkaConfig) -> Result<Arc<dyn KafkaClient>> {
    Ok(Arc::new(RdKafkaClient::new(config)?))
}

#[cfg(not(feature = "kafka"))]
fn connect_kafka(_config: &KafkaConfig) -> Result<Arc<dyn KafkaClient>> {
    anyhow::bail!("KAFKA_ENABLED=true but the server was built without the `kafka` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_disabled_client() {
        let config = KafkaConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(build_client(&config).is_ok());
    }
}
