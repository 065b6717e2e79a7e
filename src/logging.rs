use tracing_subscriber::EnvFilter;

/// Initialize console logging. `RUST_LOG` overrides the default level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("listing_scout=info,warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
