use glazed_core::DOT_GLAZED_LOGS_DIR;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs to stdout and to a daily file in `./.glazed/logs`.
///
/// The returned guard flushes the file writer and must outlive the program.
pub fn init(level: Option<&str>) -> anyhow::Result<WorkerGuard> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let appender = tracing_appender::rolling::daily(DOT_GLAZED_LOGS_DIR, "glazed.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_sub = Layer::new().with_writer(non_blocking).with_ansi(false).compact();
    let stdout_sub = Layer::new().with_writer(std::io::stdout).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_sub)
        .with(file_sub)
        .try_init()?;

    Ok(guard)
}
