use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `LOG_LEVEL` applies to this
/// workspace and to `tower_http`. Production emits JSON lines.
pub fn init(config: &Config) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "user_api={0},auth={0},tower_http={0}",
            config.log_level
        ))
    });

    let json = config.is_production();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .try_init()
}
