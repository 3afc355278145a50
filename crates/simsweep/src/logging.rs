use color_eyre::eyre::eyre;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr so stdout carries only results.
///
/// The log level can be controlled via the `level` parameter or the `RUST_LOG` environment variable.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    // Build filter from RUST_LOG env var or use provided level
    let default_filter = format!("simsweep={level},simsweep_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()
        .map_err(|e| eyre!("failed to initialize logging: {e}"))?;

    tracing::debug!("logging initialized (level={level})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that installs a global subscriber
    #[test]
    fn test_init_logging_installs_once() {
        assert!(init_logging("debug").is_ok());
        assert!(init_logging("info").is_err());
    }
}
