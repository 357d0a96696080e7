//! Logging setup shared by the server and client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter covers the calling application crate and this shared
/// crate; it can be overridden entirely with the `RUST_LOG` environment
/// variable.
///
/// # Arguments
///
/// * `app_name` - The package name of the calling binary (e.g., "daiptalk-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use daiptalk_shared::logger::setup_logger;
///
/// setup_logger("daiptalk-server", "info");
/// ```
pub fn setup_logger(app_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},daiptalk_shared={}",
                    app_name.replace("-", "_"),
                    default_log_level,
                    default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
