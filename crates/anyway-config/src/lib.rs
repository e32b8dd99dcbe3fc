// ============================================================================
// Anyway Config - Centralized configuration management
// ============================================================================
//
// Loads the gateway configuration from environment variables (and an
// optional .env file) with sensible defaults.
//
// ============================================================================

mod constants;
mod kafka;
mod logging;

pub use constants::MAX_REQUEST_BODY_SIZE;
pub use kafka::{KafkaConfig, MetadataStrategy};
pub use logging::LoggingConfig;

use anyhow::Result;
use constants::*;

/// Main configuration structure for the gateway
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    /// Used in the health check message ("<service_name> API is running")
    pub service_name: String,
    /// Per-request deadline handed to the broker client; 0 disables it
    pub request_timeout_ms: u64,
    pub rust_log: Option<String>,

    // Sub-configurations
    pub logging: LoggingConfig,
    pub kafka: KafkaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: format!("0.0.0.0:{}", DEFAULT_PORT),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            request_timeout_ms: 0,
            rust_log: None,
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            kafka: KafkaConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let logging = LoggingConfig::from_env();
        let kafka = KafkaConfig::from_env()?;

        let port = kafka::parsed_var("PORT").unwrap_or(DEFAULT_PORT);

        Ok(Self {
            port,
            bind_address: format!("0.0.0.0:{}", port),
            service_name: kafka::non_empty_var("SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            request_timeout_ms: kafka::parsed_var("REQUEST_TIMEOUT_MS").unwrap_or(0),
            rust_log: kafka::non_empty_var("RUST_LOG"),
            logging,
            kafka,
        })
    }

    /// Filter directive for the tracing subscriber (RUST_LOG wins over LOG_LEVEL)
    pub fn log_filter(&self) -> String {
        self.rust_log
            .clone()
            .unwrap_or_else(|| self.logging.level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "PORT",
        "SERVICE_NAME",
        "LOG_LEVEL",
        "REQUEST_TIMEOUT_MS",
        "KAFKA_ENABLED",
        "KAFKA_BROKER",
        "KAFKA_TOPIC",
        "KAFKA_METADATA_STRATEGY",
        "KAFKA_PRODUCER_LINGER_MS",
    ];

    fn clear_env() {
        // SAFETY: tests touching the environment are #[serial]
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.service_name, "anyway");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.kafka.brokers, "localhost:9092");
        assert_eq!(config.kafka.topic, "anyway-topic");
        assert_eq!(config.kafka.metadata_strategy, MetadataStrategy::ContextOverride);
        assert!(config.kafka.enabled);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "9090");
            std::env::set_var("LOG_LEVEL", "DEBUG");
            std::env::set_var("KAFKA_BROKER", "kafka1:9092,kafka2:9092");
            std::env::set_var("KAFKA_TOPIC", "events");
            std::env::set_var("KAFKA_METADATA_STRATEGY", "pass_through");
            std::env::set_var("KAFKA_PRODUCER_LINGER_MS", "not-a-number");
        }

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.port, 9090);
        assert_eq!(config.bind_address, "0.0.0.0:9090");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.kafka.brokers, "kafka1:9092,kafka2:9092");
        assert_eq!(config.kafka.topic, "events");
        assert_eq!(config.kafka.metadata_strategy, MetadataStrategy::PassThrough);
        // Unparseable numbers fall back to the default
        assert_eq!(config.kafka.producer_linger_ms, 10);
    }

    #[test]
    #[serial]
    fn test_invalid_strategy_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var("KAFKA_METADATA_STRATEGY", "both");
        }

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }
}
