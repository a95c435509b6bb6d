//! Process exit codes.

use std::fmt;

use security::SecurityError;

/// Exit status reported by `svcperm`.
///
/// | Code | Meaning |
/// |------|---------|
/// | 0 | success |
/// | 1 | usage error |
/// | 2 | access denied |
/// | 3 | object not found |
/// | 4 | malformed ACL |
/// | 5 | other provider or platform failure |
/// | 6 | unknown principal |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Ok = 0,
    /// Invalid command line.
    Usage = 1,
    /// The provider refused access.
    AccessDenied = 2,
    /// The object does not exist.
    NotFound = 3,
    /// The stored ACL is inconsistent with its own header.
    Malformed = 4,
    /// Any other failure.
    Failure = 5,
    /// A principal name could not be resolved.
    UnknownPrincipal = 6,
}

impl ExitCode {
    /// Numeric value passed to the operating system.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Short description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Usage => "usage error",
            Self::AccessDenied => "access denied",
            Self::NotFound => "object not found",
            Self::Malformed => "malformed ACL",
            Self::Failure => "operation failed",
            Self::UnknownPrincipal => "unknown principal",
        }
    }

    /// Exit code for an adapter error.
    #[must_use]
    pub const fn for_error(error: &SecurityError) -> Self {
        match error {
            SecurityError::AccessDenied { .. } => Self::AccessDenied,
            SecurityError::ObjectNotFound { .. } => Self::NotFound,
            SecurityError::UnknownPrincipal { .. } => Self::UnknownPrincipal,
            _ if error.is_malformed() => Self::Malformed,
            _ => Self::Failure,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Converts a status returned by [`run`](crate::run) into a process exit
/// code, clamping values outside `0..=255` to the generic failure code.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let code = u8::try_from(status).unwrap_or(ExitCode::Failure.as_i32() as u8);
    std::process::ExitCode::from(code)
}
