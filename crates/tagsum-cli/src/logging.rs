use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
/// `RUST_LOG` overrides the default `warn` level.
pub fn init(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let res = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    res.map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
