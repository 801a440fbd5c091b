use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Used when `RUST_LOG` isn't set. Progress goes to stdout, so the logger stays quiet unless
/// something is wrong.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Installs the global subscriber. Logs are written to stderr.
pub fn enable_logging() -> Result<()> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .pretty()
        .try_init()
        .map_err(|e| anyhow!("Failed to enable logging: {e}"))?;
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
