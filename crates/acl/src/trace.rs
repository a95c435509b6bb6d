//! Merge decision tracing.

use crate::mask::AccessMask;
use crate::merge::MergeOutcome;
use crate::sid::Sid;

/// Tracing target for merge decisions.
#[cfg(feature = "tracing")]
pub const ACL_TARGET: &str = "svcperm::acl";

/// Records the decision taken for one grant.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_merge(outcome: &MergeOutcome, principal: &Sid, mask: AccessMask) {
    match *outcome {
        MergeOutcome::Updated {
            index,
            previous,
            current,
        } => tracing::debug!(
            target: ACL_TARGET,
            index,
            principal = %principal,
            previous = %previous,
            current = %current,
            "merge: widened existing allow entry"
        ),
        MergeOutcome::InsertedBeforeInherited { index } => tracing::debug!(
            target: ACL_TARGET,
            index,
            principal = %principal,
            mask = %mask,
            "merge: inserted allow entry ahead of inherited entries"
        ),
        MergeOutcome::Appended { index } => tracing::debug!(
            target: ACL_TARGET,
            index,
            principal = %principal,
            mask = %mask,
            "merge: appended allow entry"
        ),
    }
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_merge(_outcome: &MergeOutcome, _principal: &Sid, _mask: AccessMask) {}
