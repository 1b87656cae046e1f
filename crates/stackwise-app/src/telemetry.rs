use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. Returns `false` if a subscriber was already installed.
pub fn init(settings: &LogSettings) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if settings.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
