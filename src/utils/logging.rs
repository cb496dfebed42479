//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use super::toml_config::LoggingConfig;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the filter directive: `--verbose` wins, then `RUST_LOG`, then the config file.
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config, verbose));

    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            json: false,
        };

        assert_eq!(env_filter(&config, true).to_string(), "debug");
    }
}
