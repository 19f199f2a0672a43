//! Subscriber installation.

pub mod spans;

use dqm_core::config::ObservabilityConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Returns `false` when a
/// global subscriber was already installed, in which case nothing changes.
pub fn init(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(dqm_core::config::defaults::DEFAULT_LOG_LEVEL));

    let installed = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.log_level, json = config.json, "tracing initialised");
            true
        }
        Err(_) => false,
    }
}
