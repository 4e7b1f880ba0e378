//! Tracing setup: compact console output plus a daily log file

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_DIR: &str = "spacecounter";
const LOG_PREFIX: &str = "spacecounter";

/// Logs directory under the platform data dir
/// (e.g. ~/.local/share/spacecounter/logs on Linux)
pub fn logs_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

/// Install the global subscriber.
///
/// Console logs go to stderr so they don't interleave with the counter view.
/// Returns the file writer guard when file logging is available; keep it alive
/// for the lifetime of the program.
pub fn init_tracing() -> Option<WorkerGuard> {
    // RUST_LOG wins; crate names use underscores in targets
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,spacecounter_core=info,spacecounter_client=info,spacecounter=info")
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let logs_dir = logs_dir();
    let file_appender = std::fs::create_dir_all(&logs_dir)
        .map_err(|e| e.to_string())
        .and_then(|_| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_PREFIX)
                .filename_suffix("log")
                .build(&logs_dir)
                .map_err(|e| e.to_string())
        });

    match file_appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();
            tracing::warn!(error = %e, dir = %logs_dir.display(), "File logging disabled");
            None
        }
    }
}
