//! Errors surfaced by the permission editor.

use acl::AclError;
use thiserror::Error;

use crate::provider::ProviderStatus;

/// Errors raised while reading, merging or writing an object's DACL.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// The provider refused access to the object.
    #[error("access denied to '{object}'")]
    AccessDenied {
        /// Object name as supplied by the caller.
        object: String,
    },

    /// The provider does not know the object.
    #[error("object '{object}' not found")]
    ObjectNotFound {
        /// Object name as supplied by the caller.
        object: String,
    },

    /// Any other provider status, surfaced unchanged.
    #[error("{operation} of '{object}' failed with status {code}")]
    Provider {
        /// Object name as supplied by the caller.
        object: String,
        /// `"read"` or `"write"`.
        operation: &'static str,
        /// Provider-specific status code.
        code: u32,
    },

    /// The object has no DACL at all, which grants everyone full access.
    /// Adding an entry would restrict access instead of widening it.
    #[error("'{object}' has a null DACL; refusing to restrict unrestricted access")]
    NullDacl {
        /// Object name as supplied by the caller.
        object: String,
    },

    /// The DACL buffer could not be decoded or encoded.
    #[error(transparent)]
    Acl(#[from] AclError),

    /// The identity resolver has no binary identity for the name.
    #[error("unknown principal '{name}'")]
    UnknownPrincipal {
        /// Name as supplied by the caller.
        name: String,
    },

    /// No provider is available for this operation on this platform.
    #[error("{operation} is not supported on this platform")]
    Unsupported {
        /// `"read"` or `"write"`.
        operation: &'static str,
    },
}

impl SecurityError {
    /// Maps a provider status for `object` into an adapter error.
    pub(crate) fn from_status(
        status: ProviderStatus,
        object: &str,
        operation: &'static str,
    ) -> Self {
        match status {
            ProviderStatus::AccessDenied => Self::AccessDenied {
                object: object.to_owned(),
            },
            ProviderStatus::NotFound => Self::ObjectNotFound {
                object: object.to_owned(),
            },
            ProviderStatus::Unsupported => Self::Unsupported { operation },
            ProviderStatus::Other(code) => Self::Provider {
                object: object.to_owned(),
                operation,
                code,
            },
        }
    }

    /// True when the error came from a buffer that disagrees with its own
    /// header.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Acl(AclError::Malformed(_)))
    }
}
