// ============================================================================
// Anyway Server
// ============================================================================
//
// HTTP gateway that accepts messages over REST and produces them to Kafka.
//
// Flow: routes (ingress) -> messaging_service (send) -> kafka producer
// (adapter) -> broker client
//
// ============================================================================

pub mod context;
pub mod kafka;
pub mod message;
pub mod messaging_service;
pub mod metadata;
pub mod metrics;
pub mod producer;
pub mod routes;

use anyhow::Result;
use anyway_config::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use context::AppContext;
use kafka::{KafkaClient, KafkaMessageProducer};
use messaging_service::MessagingService;

/// Initialize the global tracing subscriber from the logging configuration
pub fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_new(config.log_filter())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wire the production pipeline around an already constructed broker client
pub fn build_app_context(config: Arc<Config>, client: Arc<dyn KafkaClient>) -> AppContext {
    let producer = Arc::new(KafkaMessageProducer::new(client, &config.kafka));
    AppContext::new(config, MessagingService::new(producer))
}

/// Build the application context with the broker client selected by the configuration
pub fn connect(config: Arc<Config>) -> Result<AppContext> {
    let client = kafka::build_client(&config.kafka)?;
    Ok(build_app_context(config, client))
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
