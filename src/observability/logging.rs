//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from the environment or the config file
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.log_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("caddy_routes={}", level)).unwrap_or_else(|_| EnvFilter::new("caddy_routes=info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let debug = default_filter("debug").to_string().to_lowercase();
        assert!(debug.contains("caddy_routes") && debug.contains("debug"));

        let fallback = default_filter("not a level!").to_string().to_lowercase();
        assert!(fallback.contains("info"));
    }

    #[test]
    fn test_init_twice() {
        let config = ObservabilityConfig::default();
        init(&config);
        init(&config);
    }
}
