//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem for native binaries
///
/// Logs are written to `~/.local/share/mmcalc-forms/logs/`
/// Log level is controlled by `MMCALC_LOG` environment variable.
///
/// # Examples
/// ```bash
/// MMCALC_LOG=debug mmcalc-forms replay script.ndjson
/// MMCALC_LOG=trace mmcalc-forms check "Ca(OH)2"
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "mmcalc-forms.log");

    // Default to info, allow override via MMCALC_LOG
    let env_filter = EnvFilter::try_from_env("MMCALC_LOG")
        .unwrap_or_else(|_| EnvFilter::new("mmcalc_forms=info,mmcalc_app=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("MMCalc forms starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("mmcalc-forms").join("logs"))
}
