// ============================================================================
// Configuration Constants
// ============================================================================

// Default port values
pub(crate) const DEFAULT_PORT: u16 = 8080;

pub(crate) const DEFAULT_SERVICE_NAME: &str = "anyway";

// Kafka defaults
pub(crate) const DEFAULT_KAFKA_BROKER: &str = "localhost:9092";
pub(crate) const DEFAULT_KAFKA_TOPIC: &str = "anyway-topic";

// Timeouts (in milliseconds)
pub(crate) const DEFAULT_PRODUCER_SEND_TIMEOUT_MS: u64 = 2000;
pub(crate) const DEFAULT_PRODUCER_FLUSH_TIMEOUT_MS: u64 = 5000;

// HTTP request body limit (in bytes)
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024; // 2 MB
