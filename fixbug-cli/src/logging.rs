//! Logging initialization for fixbug.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `FixbugConfig`. All diagnostics go to stderr so stdout only carries
//! the path of the written report.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fixbug_core::config::GeneralConfig;

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// `RUST_LOG` takes precedence over `config.log_level`.
///
/// # Formats
///
/// * `"pretty"` - Human-readable multi-line output (default)
/// * `"compact"` - One line per event
/// * `"json"` - Machine-parseable JSON lines
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match config.log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e))?,
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.pretty())
            .try_init()
            .map_err(|e| {
                anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
            })?,
        "compact" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.compact())
            .try_init()
            .map_err(|e| {
                anyhow::anyhow!("failed to initialize compact tracing subscriber: {}", e)
            })?,
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'pretty', 'compact' or 'json'",
                config.log_format
            ));
        }
    }

    Ok(())
}
