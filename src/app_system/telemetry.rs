use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::EnvFilter;

/// Installs the process-wide tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Calling
/// this more than once is harmless, later calls are ignored.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=student_registry::registration=debug,info cargo run
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(uptime())
        .compact()
        .try_init();
}
