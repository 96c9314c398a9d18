use tracing_subscriber::{fmt, EnvFilter};

/// Install the global log subscriber. `RUST_LOG` takes precedence over the
/// debug flag when set.
pub fn init(debug_mode: bool) {
    let default_level = if debug_mode { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_thread_names(debug_mode)
        .try_init();
}
