use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::error::{AppError, AppResult};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();
static LOGGER_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

const DEFAULT_LOG_DIRECTIVES: &str = "info,app::emotion=debug,tower_http=info";

/// Installs the global subscriber. Safe to call more than once; only the
/// first call has an effect.
///
/// Logs always go to stdout. When `log_dir` is given, a daily rolling file
/// `emotion-detector.log` is written there as well.
pub fn init_logging(log_dir: Option<&Path>) -> AppResult<()> {
    LOGGER_INIT
        .get_or_try_init(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
                .map_err(|err| AppError::other(format!("invalid log directives: {err}")))?;

            let (file_layer, guard) = match log_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir)?;

                    let file_appender = tracing_appender::rolling::daily(dir, "emotion-detector.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    let layer = fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true)
                        .with_timer(UtcTime::rfc_3339());
                    (Some(layer), Some(guard))
                }
                None => (None, None),
            };

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_timer(UtcTime::rfc_3339()),
                )
                .try_init()
                .map_err(|err| AppError::other(format!("failed to install subscriber: {err}")))?;

            // Held only once the subscriber that writes through it is installed.
            if let Some(guard) = guard {
                LOGGER_GUARD
                    .set(guard)
                    .map_err(|_| AppError::other("log writer guard already set"))?;
            }

            Ok(())
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent_and_creates_log_dir() {
        let temp = tempfile::tempdir().expect("temp dir");
        let log_dir = temp.path().join("logs");

        init_logging(Some(log_dir.as_path())).expect("first init");
        init_logging(None).expect("second init is a no-op");

        assert!(log_dir.is_dir());
        assert!(LOGGER_GUARD.get().is_some());
    }
}
