//! crates/logging/src/config.rs
//! Verbosity configuration derived from the command line.

use std::fmt;

/// Log level selected by the verbosity configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors only (`--quiet`).
    Error,
    /// Warnings and errors.
    Warn,
    /// Persisted changes.
    Info,
    /// Per-request merge decisions and provider calls.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing-subscriber`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

/// Verbosity requested through repeated `-v` and `--quiet`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct VerbosityConfig {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// `--quiet` suppresses warnings.
    pub quiet: bool,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level.
    pub const fn from_verbose_level(level: u8) -> Self {
        Self {
            verbose: level,
            quiet: false,
        }
    }

    /// Returns the configuration with `quiet` set.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Level events must reach to be shown. `quiet` wins over `verbose`.
    pub const fn level(&self) -> LogLevel {
        if self.quiet {
            return LogLevel::Error;
        }
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Default filter directive used when `RUST_LOG` is not set.
    pub const fn directive(&self) -> &'static str {
        self.level().as_directive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_rise_with_verbosity() {
        assert_eq!(VerbosityConfig::from_verbose_level(0).level(), LogLevel::Warn);
        assert_eq!(VerbosityConfig::from_verbose_level(1).level(), LogLevel::Info);
        assert_eq!(VerbosityConfig::from_verbose_level(2).level(), LogLevel::Debug);
        assert_eq!(VerbosityConfig::from_verbose_level(3).level(), LogLevel::Trace);
        assert_eq!(VerbosityConfig::from_verbose_level(9).level(), LogLevel::Trace);
    }

    #[test]
    fn quiet_overrides_verbose() {
        let config = VerbosityConfig::from_verbose_level(3).with_quiet(true);
        assert_eq!(config.level(), LogLevel::Error);
        assert_eq!(config.directive(), "error");
    }
}
