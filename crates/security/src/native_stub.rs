//! Native provider stub for platforms without a Win32 security API.

use crate::provider::{ObjectKind, ProviderStatus, SecurityInfo, SecurityInfoProvider};

/// Reports every call as unsupported. Use
/// [`BlobProvider`](crate::BlobProvider) for offline editing instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProvider;

impl NativeProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SecurityInfoProvider for NativeProvider {
    fn get_dacl(&self, _object: &str, _kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus> {
        Err(ProviderStatus::Unsupported)
    }

    fn set_dacl(
        &self,
        _object: &str,
        _kind: ObjectKind,
        _info: &SecurityInfo,
    ) -> Result<(), ProviderStatus> {
        Err(ProviderStatus::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_call_is_unsupported() {
        let provider = NativeProvider::new();
        assert_eq!(
            provider.get_dacl("Spooler", ObjectKind::Service),
            Err(ProviderStatus::Unsupported)
        );
        assert_eq!(
            provider.set_dacl("Spooler", ObjectKind::Service, &SecurityInfo::null_dacl()),
            Err(ProviderStatus::Unsupported)
        );
    }
}
