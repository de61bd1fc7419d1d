//! Logging setup
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, a daily rolling file (`print-host.log.YYYY-MM-DD`)
//! is written as well; files older than [`LOG_RETENTION_DAYS`] are removed
//! at startup.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

pub const LOG_RETENTION_DAYS: i64 = 14;

const LOG_FILE_PREFIX: &str = "print-host.log";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize tracing
///
/// `RUST_LOG` takes precedence over `level`. Keep the returned guard alive
/// for as long as file logging should flush.
///
/// # Examples
/// ```no_run
/// // Console only
/// let _guard = print_host::logger::init_logger_with_file("debug", false, None)?;
///
/// // Console + ./print-host/logs
/// let _guard = print_host::logger::init_logger_with_file(
///     "info",
///     true,
///     Some(std::path::Path::new("./print-host/logs")),
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_timer(LocalTimer)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    });

    let mut guard = None;
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let removed = cleanup_old_logs(dir, LOG_RETENTION_DAYS)?;

        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);

        layers.push(if json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_writer(writer)
                .boxed()
        } else {
            fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed()
        });

        tracing_subscriber::registry()
            .with(layers)
            .with(env_filter)
            .try_init()?;
        tracing::debug!(path = %dir.display(), removed, "File logging enabled");
    } else {
        tracing_subscriber::registry()
            .with(layers)
            .with(env_filter)
            .try_init()?;
    }

    Ok(guard)
}

/// Delete rolled log files older than `days`
///
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(days);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        else {
            continue;
        };
        if date < cutoff {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}
