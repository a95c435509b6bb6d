//! The security-info provider seam.

use std::fmt;

use acl::Sid;
use thiserror::Error;

/// Kind of securable object a name refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A service registered with the service control manager.
    #[default]
    Service,
    /// A file or directory path.
    File,
}

impl ObjectKind {
    /// Lowercase name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a provider returns for an object and accepts back when writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityInfo {
    /// Raw DACL bytes. `None` is a null DACL.
    pub dacl: Option<Vec<u8>>,
    /// Owner identity, when the provider reports one.
    pub owner: Option<Sid>,
    /// Primary group identity, when the provider reports one.
    pub group: Option<Sid>,
}

impl SecurityInfo {
    /// Info carrying only a DACL buffer.
    #[must_use]
    pub fn with_dacl(dacl: Vec<u8>) -> Self {
        Self {
            dacl: Some(dacl),
            ..Self::default()
        }
    }

    /// Info for an object without a DACL.
    #[must_use]
    pub fn null_dacl() -> Self {
        Self::default()
    }
}

/// Failure reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProviderStatus {
    /// The caller lacks the rights for the call.
    #[error("access denied")]
    AccessDenied,
    /// No such object.
    #[error("not found")]
    NotFound,
    /// The provider cannot operate on this platform.
    #[error("unsupported")]
    Unsupported,
    /// Any other provider status code.
    #[error("status {0}")]
    Other(u32),
}

/// Reads and writes the DACL of named objects.
///
/// Calls are synchronous and are not retried by callers.
pub trait SecurityInfoProvider {
    /// Returns the current security info of `object`.
    fn get_dacl(&self, object: &str, kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus>;

    /// Replaces the DACL of `object`. Owner and group are passed through as
    /// they were read.
    fn set_dacl(
        &self,
        object: &str,
        kind: ObjectKind,
        info: &SecurityInfo,
    ) -> Result<(), ProviderStatus>;
}

impl<P: SecurityInfoProvider + ?Sized> SecurityInfoProvider for &P {
    fn get_dacl(&self, object: &str, kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus> {
        (**self).get_dacl(object, kind)
    }

    fn set_dacl(
        &self,
        object: &str,
        kind: ObjectKind,
        info: &SecurityInfo,
    ) -> Result<(), ProviderStatus> {
        (**self).set_dacl(object, kind, info)
    }
}

impl<P: SecurityInfoProvider + ?Sized> SecurityInfoProvider for Box<P> {
    fn get_dacl(&self, object: &str, kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus> {
        (**self).get_dacl(object, kind)
    }

    fn set_dacl(
        &self,
        object: &str,
        kind: ObjectKind,
        info: &SecurityInfo,
    ) -> Result<(), ProviderStatus> {
        (**self).set_dacl(object, kind, info)
    }
}
