use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `VOLT_LOG=volt=debug`
pub const LOG_ENV: &str = "VOLT_LOG";

/// Install the stderr subscriber; stdout is reserved for reports
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
