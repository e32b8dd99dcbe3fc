use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, TextEncoder, opts, register_int_counter_vec};

/// Requests to the send endpoint, by outcome
pub static HTTP_SEND_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        opts!(
            "anyway_http_send_requests_total",
            "Total number of send requests by outcome"
        ),
        &["outcome"]
    )
    .expect("Failed to register anyway_http_send_requests_total metric")
});

pub fn gather_metrics() -> Result<String> {
    // Touch lazily registered collectors so they show up before first use
    Lazy::force(&HTTP_SEND_REQUESTS_TOTAL);
    Lazy::force(&crate::kafka::metrics::PRODUCE_SUCCESS_TOTAL);
    Lazy::force(&crate::kafka::metrics::PRODUCE_FAILURE_TOTAL);
    Lazy::force(&crate::kafka::metrics::PRODUCE_LATENCY_SECONDS);

    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}
