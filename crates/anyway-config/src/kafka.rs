// ============================================================================
// Kafka Configuration
// ============================================================================

use std::fmt;
use std::str::FromStr;

use super::constants::*;

/// How correlation metadata ends up on the produced record.
///
/// Exactly one strategy is active per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MetadataStrategy {
    /// Record key is the routing id; headers are exactly
    /// `correlation_id` and `request_id` taken from the request metadata.
    #[default]
    ContextOverride,
    /// Key, headers and content are copied from the message untouched.
    PassThrough,
}

impl MetadataStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataStrategy::ContextOverride => "context_override",
            MetadataStrategy::PassThrough => "pass_through",
        }
    }
}

impl fmt::Display for MetadataStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "context_override" | "context-override" => Ok(MetadataStrategy::ContextOverride),
            "pass_through" | "pass-through" | "passthrough" => Ok(MetadataStrategy::PassThrough),
            other => anyhow::bail!(
                "Unknown KAFKA_METADATA_STRATEGY '{}' (expected context_override or pass_through)",
                other
            ),
        }
    }
}

/// Kafka producer configuration
#[derive(Clone, Debug)]
pub struct KafkaConfig {
    /// Whether Kafka is enabled (false = acknowledge locally without sending)
    pub enabled: bool,
    /// Comma-separated list of Kafka brokers (e.g., "kafka1:9092,kafka2:9092")
    pub brokers: String,
    /// Topic every message is produced to
    pub topic: String,
    pub metadata_strategy: MetadataStrategy,
    /// SSL/TLS enabled
    pub ssl_enabled: bool,
    /// SASL mechanism (e.g., "SCRAM-SHA-256", "PLAIN")
    pub sasl_mechanism: Option<String>,
    pub sasl_username: Option<String>,
    pub sasl_password: Option<String>,
    /// Path to CA certificate file (for self-signed certificates)
    pub ssl_ca_location: Option<String>,
    // producer-specific settings
    pub producer_compression: String, // "zstd" | "snappy" | "gzip" | "lz4" | "none"
    pub producer_acks: String,        // "all" | "1" | "-1" | "0"
    pub producer_linger_ms: u32,
    pub producer_batch_size: u32,
    pub producer_enable_idempotence: bool,
    pub producer_message_timeout_ms: u32,
    pub producer_request_timeout_ms: u32,
    /// Upper bound on waiting for room in the local producer queue
    pub producer_send_timeout_ms: u64,
    pub producer_flush_timeout_ms: u64,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            brokers: DEFAULT_KAFKA_BROKER.to_string(),
            topic: DEFAULT_KAFKA_TOPIC.to_string(),
            metadata_strategy: MetadataStrategy::default(),
            ssl_enabled: false,
            sasl_mechanism: None,
            sasl_username: None,
            sasl_password: None,
            ssl_ca_location: None,
            producer_compression: "snappy".to_string(),
            producer_acks: "all".to_string(),
            producer_linger_ms: 10,
            producer_batch_size: 16384,
            producer_enable_idempotence: true,
            producer_message_timeout_ms: 30000,
            producer_request_timeout_ms: 30000,
            producer_send_timeout_ms: DEFAULT_PRODUCER_SEND_TIMEOUT_MS,
            producer_flush_timeout_ms: DEFAULT_PRODUCER_FLUSH_TIMEOUT_MS,
        }
    }
}

impl KafkaConfig {
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let metadata_strategy = match std::env::var("KAFKA_METADATA_STRATEGY") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => defaults.metadata_strategy,
        };

        Ok(Self {
            enabled: std::env::var("KAFKA_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enabled),
            brokers: non_empty_var("KAFKA_BROKER").unwrap_or(defaults.brokers),
            topic: non_empty_var("KAFKA_TOPIC").unwrap_or(defaults.topic),
            metadata_strategy,
            ssl_enabled: std::env::var("KAFKA_SSL_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            sasl_mechanism: non_empty_var("KAFKA_SASL_MECHANISM"),
            sasl_username: non_empty_var("KAFKA_SASL_USERNAME"),
            sasl_password: non_empty_var("KAFKA_SASL_PASSWORD"),
            ssl_ca_location: non_empty_var("KAFKA_SSL_CA_LOCATION"),
            producer_compression: non_empty_var("KAFKA_PRODUCER_COMPRESSION")
                .unwrap_or(defaults.producer_compression),
            producer_acks: non_empty_var("KAFKA_PRODUCER_ACKS").unwrap_or(defaults.producer_acks),
            producer_linger_ms: parsed_var("KAFKA_PRODUCER_LINGER_MS")
                .unwrap_or(defaults.producer_linger_ms),
            producer_batch_size: parsed_var("KAFKA_PRODUCER_BATCH_SIZE")
                .unwrap_or(defaults.producer_batch_size),
            producer_enable_idempotence: parsed_var("KAFKA_PRODUCER_ENABLE_IDEMPOTENCE")
                .unwrap_or(defaults.producer_enable_idempotence),
            producer_message_timeout_ms: parsed_var("KAFKA_PRODUCER_MESSAGE_TIMEOUT_MS")
                .unwrap_or(defaults.producer_message_timeout_ms),
            producer_request_timeout_ms: parsed_var("KAFKA_PRODUCER_REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.producer_request_timeout_ms),
            producer_send_timeout_ms: parsed_var("KAFKA_PRODUCER_SEND_TIMEOUT_MS")
                .unwrap_or(defaults.producer_send_timeout_ms),
            producer_flush_timeout_ms: parsed_var("KAFKA_PRODUCER_FLUSH_TIMEOUT_MS")
                .unwrap_or(defaults.producer_flush_timeout_ms),
        })
    }
}

pub(crate) fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
