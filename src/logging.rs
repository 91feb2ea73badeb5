use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::{CONFIG, LoggingConfig};

pub const LOG_FILE_PREFIX: &str = "result_chunks.log";

/// Installs the global subscriber: coloured stdout plus a daily rolling file
/// under `logging.log_dir`, each with its own level.
pub fn init() -> anyhow::Result<()> {
    let cfg: &LoggingConfig = &CONFIG.logging;
    let stdout_level: LevelFilter = cfg.stdout_level.parse()?;
    let file_level: LevelFilter = cfg.file_level.parse()?;

    let file_writer = tracing_appender::rolling::daily(&cfg.log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_filter(stdout_level))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_level),
        )
        .try_init()?;

    info!(
        target: "logging::init",
        stdout = %stdout_level,
        file = %file_level,
        dir = %cfg.log_dir,
        "Logging ready"
    );
    Ok(())
}

/// Routes chunk logs at debug level into the test harness output.
#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env().add_directive(LevelFilter::DEBUG.into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
