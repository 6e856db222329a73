use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Pick the filter directive: explicit override, then the configured level
fn directive<'a>(config: &'a LoggingConfig, level_override: Option<&'a str>) -> &'a str {
    level_override.unwrap_or(config.level.as_str())
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over both the command-line level and the config file.
/// Output goes to stderr. Calling this twice is harmless.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) {
    let level = directive(config, level_override);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
