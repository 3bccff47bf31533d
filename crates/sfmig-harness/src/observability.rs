// Tracing initialization for harness runs.
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a global subscriber. Later calls are no-ops.
pub fn init_tracing_with_level(level: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = tracing_subscriber::registry()
        .with(env_filter(level, rust_log.as_deref()))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

// Prefer RUST_LOG from env, otherwise use provided level string.
fn env_filter(level: &str, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn configured_level_is_used_without_rust_log() {
        assert_eq!(
            env_filter("debug", None).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        assert_eq!(
            env_filter("debug", Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
