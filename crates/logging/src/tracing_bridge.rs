//! crates/logging/src/tracing_bridge.rs
//! Installs the process-wide tracing subscriber.
//!
//! The subscriber is a `tracing-subscriber` registry with two layers:
//!
//! - an [`EnvFilter`] whose default directive comes from the
//!   [`VerbosityConfig`], replaced entirely when `RUST_LOG` is set;
//! - a compact `fmt` layer writing to stderr, so stdout stays reserved for
//!   command output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(&VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "svcperm::acl", "merge: appended allow entry");
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::config::VerbosityConfig;

/// Builds the filter for `config`, honouring `RUST_LOG` when it parses.
#[must_use]
pub fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()))
}

/// Initialize tracing for the process.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init_tracing(config: &VerbosityConfig) -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(fmt_layer)
        .try_init()
        .is_ok();
    if installed {
        tracing::trace!(target: "svcperm::logging", level = %config.level(), "subscriber installed");
    }
    installed
}
