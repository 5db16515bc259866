use tracing_subscriber::EnvFilter;

/// Dedicated filter variable; falls back to `RUST_LOG`, then the configured level.
pub const LOG_ENV: &str = "DAILY_WEATHER_LOG";

pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// the weather line.
pub fn init(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
