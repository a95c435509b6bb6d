//! Read-merge-write of an object's DACL.

use acl::{AccessMask, Ace, Acl, GrantRequest, MergeOutcome, Sid, decode, encode, merge_detailed};

use crate::error::SecurityError;
use crate::provider::{ObjectKind, SecurityInfo, SecurityInfoProvider};

/// Tracing target for adapter events.
pub const SECURITY_TARGET: &str = "svcperm::security";

/// Options applied to every grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrantOptions {
    /// Kind of object names refer to.
    pub kind: ObjectKind,
    /// Read and merge, but never write.
    pub dry_run: bool,
}

/// What one grant did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantReport {
    /// Object name as supplied.
    pub object: String,
    /// Principal the grant was for.
    pub principal: Sid,
    /// Merge decision.
    pub outcome: MergeOutcome,
    /// Mask of the granted entry after the merge.
    pub mask: AccessMask,
    /// Whether the merge changed the list.
    pub changed: bool,
    /// Whether a new list was written. False with `changed` set means the
    /// write was skipped for a dry run.
    pub written: bool,
}

/// Applies grants to objects through a [`SecurityInfoProvider`].
///
/// Each grant performs exactly one read and at most one write. Nothing is
/// retried and the write is not verified by reading back. A change made by
/// someone else between the read and the write is overwritten.
#[derive(Debug)]
pub struct PermissionEditor<P> {
    provider: P,
    options: GrantOptions,
}

impl<P: SecurityInfoProvider> PermissionEditor<P> {
    /// Wraps `provider`.
    pub const fn new(provider: P, options: GrantOptions) -> Self {
        Self { provider, options }
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Options in effect.
    pub const fn options(&self) -> GrantOptions {
        self.options
    }

    fn read_info(&self, object: &str) -> Result<(SecurityInfo, Acl), SecurityError> {
        let kind = self.options.kind;
        tracing::debug!(target: SECURITY_TARGET, object, %kind, "reading DACL");

        let mut info = self
            .provider
            .get_dacl(object, kind)
            .map_err(|status| SecurityError::from_status(status, object, "read"))?;
        let Some(raw) = info.dacl.take() else {
            return Err(SecurityError::NullDacl {
                object: object.to_owned(),
            });
        };
        let acl = decode(&raw)?;
        tracing::debug!(
            target: SECURITY_TARGET,
            object,
            entries = acl.len(),
            revision = acl.revision(),
            "decoded DACL"
        );
        Ok((info, acl))
    }

    fn write_info(&self, object: &str, info: &SecurityInfo) -> Result<(), SecurityError> {
        self.provider
            .set_dacl(object, self.options.kind, info)
            .map_err(|status| SecurityError::from_status(status, object, "write"))
    }

    /// Reads and decodes the DACL of `object`.
    ///
    /// # Errors
    ///
    /// Provider failures, a null DACL, or a malformed buffer.
    pub fn read_list(&self, object: &str) -> Result<Acl, SecurityError> {
        self.read_info(object).map(|(_, acl)| acl)
    }

    /// Encodes `list` and writes it as the DACL of `object`.
    ///
    /// # Errors
    ///
    /// Encoding failures abort before the provider is called; provider
    /// failures are mapped like [`read_list`](Self::read_list).
    pub fn write_list(&self, object: &str, list: &Acl) -> Result<(), SecurityError> {
        let raw = encode(list)?;
        self.write_info(object, &SecurityInfo::with_dacl(raw))
    }

    /// Ensures the request's principal holds the request's rights on
    /// `object`.
    ///
    /// The new list is written only when the merge changed it and the
    /// options do not ask for a dry run.
    ///
    /// # Errors
    ///
    /// Everything [`read_list`](Self::read_list) and
    /// [`write_list`](Self::write_list) can return. No write happens when
    /// any step before it fails.
    pub fn grant(
        &self,
        object: &str,
        request: &GrantRequest,
    ) -> Result<GrantReport, SecurityError> {
        let (info, acl) = self.read_info(object)?;
        let merged = merge_detailed(acl, request);
        let index = merged.outcome.index();
        let changed = merged.changed();

        if changed && merged.acl.inherited_deny_after(index) {
            tracing::warn!(
                target: SECURITY_TARGET,
                object,
                principal = %request.principal(),
                index,
                "granted allow entry precedes an inherited deny entry"
            );
        }

        let mask = merged
            .acl
            .entries()
            .get(index)
            .and_then(Ace::mask)
            .unwrap_or_else(|| request.mask());

        let written = if !changed {
            tracing::debug!(target: SECURITY_TARGET, object, "rights already present; not writing");
            false
        } else if self.options.dry_run {
            tracing::info!(target: SECURITY_TARGET, object, "dry run; not writing");
            false
        } else {
            let raw = encode(&merged.acl)?;
            let update = SecurityInfo {
                dacl: Some(raw),
                ..info
            };
            self.write_info(object, &update)?;
            tracing::info!(
                target: SECURITY_TARGET,
                object,
                principal = %request.principal(),
                mask = %mask,
                outcome = merged.outcome.label(),
                "wrote DACL"
            );
            true
        };

        Ok(GrantReport {
            object: object.to_owned(),
            principal: request.principal().clone(),
            outcome: merged.outcome,
            mask,
            changed,
            written,
        })
    }
}
