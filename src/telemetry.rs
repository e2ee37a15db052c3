//! Logging setup for the command line tool.
//!
//! Events go to stderr so stdout carries nothing but the generated schema.
//! Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=eip712_typegen=debug`),
//! falling back to the default directive.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Builder for the global tracing subscriber.
pub struct Telemetry {
    default_level: LevelFilter,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            default_level: LevelFilter::INFO,
        }
    }

    /// Level used when `RUST_LOG` is not set.
    pub fn with_default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    /// Installs the subscriber globally.
    pub fn register(self) {
        let filter = EnvFilter::builder()
            .with_default_directive(self.default_level.into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        tracing::debug!("Logging initialized");
    }
}
