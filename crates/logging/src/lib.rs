#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the command line's verbosity flags into a log level and,
//! with the `tracing` feature, installs the `tracing-subscriber` stack that
//! renders library events on stderr.
//!
//! # Levels
//!
//! | Flags | Level |
//! |-------|-------|
//! | `-q` | error |
//! | none | warn |
//! | `-v` | info |
//! | `-vv` | debug |
//! | `-vvv` and more | trace |
//!
//! `RUST_LOG` replaces the derived filter when set.

mod config;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{LogLevel, VerbosityConfig};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{build_filter, init_tracing};
