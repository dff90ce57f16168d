use tracing::Span;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE: &str = "robot";

/// The worker and its migrations at info; dependencies only when they warn.
const DEFAULT_FILTER: &str = "warn,robot=info,migration=info";

/// Installs JSON logging and returns the root span every worker log nests under.
pub fn init_tracing() -> Span {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json()
        .with_current_span(false)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info_span!("service", service = SERVICE, version = env!("CARGO_PKG_VERSION"))
}
