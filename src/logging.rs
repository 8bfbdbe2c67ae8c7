use tracing_subscriber::EnvFilter;

/// Initialize structured logging for the process.
///
/// Called once by the embedding shell before bootstrap. `RUST_LOG`
/// overrides the default filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,emberlight=debug")),
        )
        .init();
}
