//! Logging configuration using the tracing framework
//!
//! Logs can be controlled via the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::error::{Result, TrackerError};

const DEFAULT_FILTER: &str = "lifetracker=info,warn";
const VERBOSE_FILTER: &str = "lifetracker=debug,warn";

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    })
}

/// Initialize logging for CLI subcommands
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log level (e.g., "debug", "info", "warn", "error")
///   - Default: "lifetracker=info,warn" (`--verbose` switches to debug)
///   - Examples:
///     - `RUST_LOG=lifetracker::store=debug` - Debug logs for the store only
pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Initialize logging with file output only
///
/// Used by the interactive dashboard, where anything written to the
/// terminal would corrupt the screen. Logs rotate daily under the
/// project data directory.
///
/// # Examples
///
/// ```no_run
/// use lifetracker::logging;
///
/// logging::init_with_file("lifetracker.log", false).expect("Failed to initialize logging");
/// ```
pub fn init_with_file(log_file_name: &str, verbose: bool) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_dir = if let Some(proj_dirs) = Config::project_dirs() {
        let log_path = proj_dirs.data_dir().join("logs");
        std::fs::create_dir_all(&log_path)?;
        log_path
    } else {
        std::env::current_dir()?
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_file_name);

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .try_init()
        .map_err(|e| TrackerError::Logging(e.to_string()))?;

    Ok(())
}

/// Initialize logging for tests
///
/// Only errors are shown by default.
pub fn init_test() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init()
        .ok(); // Ignore errors if already initialized
}


// Made with Bob
