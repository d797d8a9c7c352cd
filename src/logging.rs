// Logging setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins; otherwise `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second call (e.g. from tests) is a no-op
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
