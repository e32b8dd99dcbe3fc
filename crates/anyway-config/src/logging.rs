// ============================================================================
// Logging Configuration
// ============================================================================

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Normalized log level used when RUST_LOG is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LoggingConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            level: normalize_level(
                &std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            ),
            json: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

/// Unknown levels fall back to `info`.
pub(crate) fn normalize_level(raw: &str) -> String {
    let level = raw.trim().to_ascii_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        level
    } else {
        "info".to_string()
    }
}
