use super::config::{ConfigError, LogFormat, LogLevel};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Dependencies that are only interesting when something is wrong.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

pub fn build_filter_string(default_level: LogLevel) -> String {
    let mut filter_parts = Vec::with_capacity(QUIET_TARGETS.len() + 1);
    filter_parts.push(default_level.as_str().to_string());

    for target in QUIET_TARGETS {
        filter_parts.push(format!("{target}=warn"));
    }

    filter_parts.join(",")
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: LogLevel, format: LogFormat) -> Result<(), ConfigError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let filter_string = build_filter_string(default_level);
            EnvFilter::try_new(&filter_string).map_err(|e| {
                ConfigError::LoggingInit(format!(
                    "Failed to create EnvFilter with '{filter_string}': {e}"
                ))
            })?
        }
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| ConfigError::LoggingInit(format!("Failed to set global subscriber: {e}")))
}
