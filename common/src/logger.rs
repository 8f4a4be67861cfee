//! Tracing subscriber setup.
//!
//! Binaries call [`init_logging`] once at startup and hold on to the returned guard; dropping it
//! flushes and stops the background file writer. Tests call [`init_test_logging`], which may be
//! called any number of times.

use std::fs;
use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config;

const LOG_DIR: &str = "logs";

/// Install the global subscriber: a daily rolling file under `logs/`, plus stdout when
/// `LOG_TO_STDOUT=true`.
///
/// `log_level` holds `EnvFilter` directives and is used when the `LOG_LEVEL` variable itself
/// does not parse. If a global subscriber is already installed this one is discarded.
pub fn init_logging(log_file: &str, log_level: &str) -> WorkerGuard {
    fs::create_dir_all(LOG_DIR).ok();

    let file_name = Path::new(log_file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scoring.log".into());
    let file_appender = rolling::daily(LOG_DIR, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config::log_to_stdout().then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
    });

    let env_filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init();

    if installed.is_err() {
        tracing::debug!("global subscriber already installed, keeping it");
    }

    guard
}

static TEST_LOGGING: Once = Once::new();

/// Route logs through the test harness writer so they show up only for failing tests.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::info!("logged from test");
    }
}
