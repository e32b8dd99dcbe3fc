use anyhow::{Context, Result};
use anyway_config::Config;
use anyway_server::{connect, init_tracing, routes, shutdown_signal};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Arc::new(Config::from_env()?);

    // Initialize tracing
    init_tracing(&config);

    info!("=== {} Gateway Starting ===", config.service_name);
    info!("Port: {}", config.port);
    info!(
        brokers = %config.kafka.brokers,
        topic = %config.kafka.topic,
        strategy = %config.kafka.metadata_strategy,
        "Kafka configuration"
    );

    let app_context = Arc::new(connect(config.clone()).context("Failed to create Kafka producer")?);
    let messaging = app_context.messaging.clone();

    let app = routes::create_router(app_context);

    info!("{} API listening on {}", config.service_name, config.bind_address);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    // In-flight requests have drained; release the producer exactly once
    messaging.shutdown().await;
    info!("Gateway stopped");

    Ok(())
}
