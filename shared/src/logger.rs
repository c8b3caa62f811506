//! Logging Infrastructure
//!
//! Structured logging shared by the admin console and the site service:
//! - Console output, pretty for development or JSON for production
//! - Optional daily rotating application logs (deleted after 14 days)
//! - Optional permanent security log (login attempts, session changes)

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Days an application log file is kept
const APP_LOG_RETENTION_DAYS: i64 = 14;

/// Delete `app.YYYY-MM-DD` files older than the retention window
pub fn cleanup_old_logs(log_dir: &Path) -> std::io::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name
            .strip_prefix("app.")
            .or_else(|| name.strip_prefix("app-"))
            .map(|d| d.trim_end_matches(".log"))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Initialize the logging system
///
/// * `level` - default filter when `RUST_LOG` is not set (e.g. "info")
/// * `json_format` - JSON console output instead of pretty output
/// * `log_dir` - when set, also write `app/` and `security/` daily files
///
/// ```no_run
/// shared::logger::init_logger_with_file("debug", false, None)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> std::io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(env_filter);

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let Some(dir) = log_dir else {
        registry.with(console_layer).init();
        return Ok(());
    };

    let log_dir = Path::new(dir);
    let app_log_dir = log_dir.join("app");
    let security_log_dir = log_dir.join("security");
    fs::create_dir_all(&app_log_dir)?;
    fs::create_dir_all(&security_log_dir)?;

    // Everything except the security target goes to the rotating app log
    let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
    let app_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(app_log))
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() != "security"
        }));

    // Never cleaned up
    let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
    let security_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(security_log))
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() == "security"
        }));

    registry
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .init();

    if let Err(e) = cleanup_old_logs(log_dir) {
        tracing::warn!(error = %e, "Failed to cleanup old logs");
    }

    Ok(())
}

/// Security log helper, written to the permanent `security` stream
///
/// ```ignore
/// security_log!(WARN, "login_failed", reason = "wrong_password");
/// security_log!(INFO, "logout");
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr $(, $($arg:tt)*)?) => {
        $crate::tracing::warn!(
            target: "security",
            event = $event,
            timestamp = $crate::chrono::Local::now().to_rfc3339()
            $(, $($arg)*)?
        )
    };
    (INFO, $event:expr $(, $($arg:tt)*)?) => {
        $crate::tracing::info!(
            target: "security",
            event = $event,
            timestamp = $crate::chrono::Local::now().to_rfc3339()
            $(, $($arg)*)?
        )
    };
}
