/// Tracing subscriber setup for the binary.
pub mod logging;
/// TOML configuration for providers, model profiles and agents.
pub mod toml_config;
