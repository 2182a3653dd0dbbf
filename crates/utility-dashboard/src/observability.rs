use tracing_subscriber::EnvFilter;

/// Log to stderr so the report on stdout stays clean
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "utility_dashboard=debug,utility_accounting=debug"
    } else {
        "utility_dashboard=warn,utility_accounting=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
