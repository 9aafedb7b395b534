use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "MIDI_OUT_LOG";

/// Install a fmt subscriber filtered by `MIDI_OUT_LOG` (default `info`).
/// Returns false if a global subscriber was already set.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
