use once_cell::sync::Lazy;
use prometheus::{Histogram, IntCounter, register_histogram, register_int_counter};
use std::time::Duration;

pub static PRODUCE_SUCCESS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "anyway_produce_success_total",
        "Records acknowledged by the broker"
    )
    .expect("Failed to register anyway_produce_success_total metric")
});

pub static PRODUCE_FAILURE_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "anyway_produce_failure_total",
        "Records the broker client failed to deliver"
    )
    .expect("Failed to register anyway_produce_failure_total metric")
});

/// Time from handing a record to the client until its acknowledgment
pub static PRODUCE_LATENCY_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "anyway_produce_latency_seconds",
        "Broker acknowledgment latency in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register anyway_produce_latency_seconds metric")
});

pub fn record_delivered(latency: Duration) {
    PRODUCE_SUCCESS_TOTAL.inc();
    PRODUCE_LATENCY_SECONDS.observe(latency.as_secs_f64());
}

pub fn record_failed() {
    PRODUCE_FAILURE_TOTAL.inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Collectors are process-global and other tests produce concurrently,
    // so only growth is asserted.
    #[test]
    fn test_record_delivered_observes_latency() {
        let delivered = PRODUCE_SUCCESS_TOTAL.get();
        let samples = PRODUCE_LATENCY_SECONDS.get_sample_count();

        record_delivered(Duration::from_millis(12));

        assert!(PRODUCE_SUCCESS_TOTAL.get() > delivered);
        assert!(PRODUCE_LATENCY_SECONDS.get_sample_count() > samples);
    }
}
