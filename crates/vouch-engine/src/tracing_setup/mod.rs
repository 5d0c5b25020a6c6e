//! Tracing setup: subscriber initialisation, span macros and structured events.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vouch_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `VOUCH_LOG` overrides the configured level, e.g.
/// `VOUCH_LOG=vouch_engine=debug,vouch_storage=warn`. Only the first call
/// installs anything; later calls and an already-installed global subscriber
/// are ignored.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("VOUCH_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let registry = tracing_subscriber::registry().with(filter);
        let installed = if config.json_logs {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_thread_ids(true))
                .try_init()
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    });
}
