use anyhow::Result;
use anyway_config::KafkaConfig;
use rdkafka::config::ClientConfig;
use tracing::info;

/// Creates a `rdkafka::config::ClientConfig` for the producer from the
/// application's `KafkaConfig`.
///
/// It handles:
/// - Bootstrap servers.
/// - SSL/TLS when `ssl_enabled` is true (with an optional CA file).
/// - SASL authentication when mechanism, username and password are all set.
/// - Producer reliability and batching settings.
pub fn create_client_config(config: &KafkaConfig) -> Result<ClientConfig> {
    let mut client_config = ClientConfig::new();
    client_config.set("bootstrap.servers", &config.brokers);

    // Default to plaintext if SSL is not explicitly enabled and no SASL.
    client_config.set("security.protocol", "plaintext");

    if config.ssl_enabled {
        info!("Enabling SSL/TLS for Kafka connection");
        client_config.set("security.protocol", "ssl");
        if let Some(ca_location) = &config.ssl_ca_location {
            client_config.set("ssl.ca.location", ca_location);
        }
    }

    if let (Some(mechanism), Some(username), Some(password)) = (
        &config.sasl_mechanism,
        &config.sasl_username,
        &config.sasl_password,
    ) {
        info!(sasl_mechanism = %mechanism, "Configuring SASL authentication");
        client_config
            .set("sasl.mechanism", mechanism)
            .set("sasl.username", username)
            .set("sasl.password", password);

        if config.ssl_enabled {
            client_config.set("security.protocol", "sasl_ssl");
        } else {
            client_config.set("security.protocol", "sasl_plaintext");
        }
    }

    client_config
        .set("acks", &config.producer_acks)
        .set(
            "enable.idempotence",
            if config.producer_enable_idempotence {
                "true"
            } else {
                "false"
            },
        )
        .set("compression.type", &config.producer_compression)
        .set("linger.ms", config.producer_linger_ms.to_string())
        .set("batch.size", config.producer_batch_size.to_string())
        .set(
            "message.timeout.ms",
            config.producer_message_timeout_ms.to_string(),
        )
        .set(
            "request.timeout.ms",
            config.producer_request_timeout_ms.to_string(),
        );

    Ok(client_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_config() {
        let config = KafkaConfig {
            brokers: "kafka1:9092,kafka2:9092".to_string(),
            ..Default::default()
        };

        let client_config = create_client_config(&config).unwrap();

        assert_eq!(
            client_config.get("bootstrap.servers"),
            Some("kafka1:9092,kafka2:9092")
        );
        assert_eq!(client_config.get("security.protocol"), Some("plaintext"));
        assert_eq!(client_config.get("acks"), Some("all"));
        assert_eq!(client_config.get("enable.idempotence"), Some("true"));
    }

    #[test]
    fn test_sasl_over_ssl_config() {
        let config = KafkaConfig {
            ssl_enabled: true,
            ssl_ca_location: Some("/etc/ssl/ca.pem".to_string()),
            sasl_mechanism: Some("SCRAM-SHA-256".to_string()),
            sasl_username: Some("gateway".to_string()),
            sasl_password: Some("secret".to_string()),
            ..Default::default()
        };

        let client_config = create_client_config(&config).unwrap();

        assert_eq!(client_config.get("security.protocol"), Some("sasl_ssl"));
        assert_eq!(client_config.get("sasl.mechanism"), Some("SCRAM-SHA-256"));
        assert_eq!(client_config.get("ssl.ca.location"), Some("/etc/ssl/ca.pem"));
    }

    #[test]
    fn test_sasl_requires_all_credentials() {
        let config = KafkaConfig {
            sasl_mechanism: Some("PLAIN".to_string()),
            sasl_username: Some("gateway".to_string()),
            ..Default::default()
        };

        let client_config = create_client_config(&config).unwrap();

        assert_eq!(client_config.get("security.protocol"), Some("plaintext"));
        assert_eq!(client_config.get("sasl.mechanism"), None);
    }
}
