use crate::error::{PointPilotError, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber, writing to stderr.
///
/// Stdout is kept free for the JSON printed by the one-shot commands.
pub fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = build_env_filter(filter)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| PointPilotError::Logging(e.to_string()))
}

fn build_env_filter(filter: &str) -> Result<EnvFilter> {
    let filter = filter.trim();
    if filter.is_empty() {
        return Ok(EnvFilter::new("info"));
    }
    EnvFilter::try_new(filter)
        .map_err(|e| PointPilotError::Logging(format!("invalid log filter '{filter}': {e}")))
}
