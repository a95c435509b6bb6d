//! Grant merge: ensure a principal holds a right without disturbing order.
//!
//! The list is walked once. The first of these decides where the grant
//! lands:
//!
//! 1. an inherited entry: a new allow entry is inserted just before it;
//! 2. a non-inherited allow entry for the principal: its mask is widened in
//!    place (bitwise OR, nothing is revoked);
//! 3. end of list: a new allow entry is appended.
//!
//! Every other entry is copied through unchanged and keeps its relative
//! position, so deny entries that preceded the grant still precede it.

use crate::ace::Ace;
use crate::list::Acl;
use crate::mask::AccessMask;
use crate::sid::Sid;
use crate::trace::trace_merge;

/// A principal and the rights it must hold after the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRequest {
    principal: Sid,
    mask: AccessMask,
}

impl GrantRequest {
    /// Builds a request. An empty mask is accepted and still produces an
    /// entry.
    #[must_use]
    pub const fn new(principal: Sid, mask: AccessMask) -> Self {
        Self { principal, mask }
    }

    /// The principal to grant to.
    #[must_use]
    pub const fn principal(&self) -> &Sid {
        &self.principal
    }

    /// The rights to ensure.
    #[must_use]
    pub const fn mask(&self) -> AccessMask {
        self.mask
    }
}

/// Where and how the grant was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// An existing allow entry for the principal was widened.
    Updated {
        /// Position of the entry.
        index: usize,
        /// Mask before the merge.
        previous: AccessMask,
        /// Mask after the merge.
        current: AccessMask,
    },
    /// A new allow entry was placed just before the first inherited entry.
    InsertedBeforeInherited {
        /// Position of the new entry.
        index: usize,
    },
    /// A new allow entry was appended.
    Appended {
        /// Position of the new entry.
        index: usize,
    },
}

impl MergeOutcome {
    /// Position of the inserted or updated entry in the merged list.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Updated { index, .. }
            | Self::InsertedBeforeInherited { index }
            | Self::Appended { index } => index,
        }
    }

    /// Short label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Updated { previous, current, .. } => {
                if previous.as_raw() == current.as_raw() {
                    "unchanged"
                } else {
                    "updated"
                }
            }
            Self::InsertedBeforeInherited { .. } => "inserted",
            Self::Appended { .. } => "appended",
        }
    }
}

/// Result of [`merge_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// The new list.
    pub acl: Acl,
    /// What the merge did.
    pub outcome: MergeOutcome,
}

impl Merged {
    /// Returns false only when an existing entry already held every
    /// requested right, leaving the list identical to its input.
    #[must_use]
    pub const fn changed(&self) -> bool {
        match self.outcome {
            MergeOutcome::Updated {
                previous, current, ..
            } => previous.as_raw() != current.as_raw(),
            MergeOutcome::InsertedBeforeInherited { .. } | MergeOutcome::Appended { .. } => true,
        }
    }
}

/// Applies `request` to `acl`, returning the new list.
#[must_use]
pub fn merge(acl: Acl, request: &GrantRequest) -> Acl {
    merge_detailed(acl, request).acl
}

/// Applies `request` to `acl`, returning the new list and the decision taken.
///
/// The revision tag is carried over unchanged. Runs in a single pass over
/// the input entries.
#[must_use]
pub fn merge_detailed(acl: Acl, request: &GrantRequest) -> Merged {
    let revision = acl.revision();
    let entries = acl.into_entries();
    let mut merged = Vec::with_capacity(entries.len() + 1);
    let mut outcome = None;

    for ace in entries {
        if outcome.is_some() {
            merged.push(ace);
            continue;
        }

        if ace.is_inherited() {
            outcome = Some(MergeOutcome::InsertedBeforeInherited {
                index: merged.len(),
            });
            merged.push(Ace::allow(request.principal.clone(), request.mask));
            merged.push(ace);
            continue;
        }

        match ace.into_allow_for(&request.principal) {
            Ok(mut entry) => {
                let previous = entry.mask;
                entry.mask = previous | request.mask;
                outcome = Some(MergeOutcome::Updated {
                    index: merged.len(),
                    previous,
                    current: entry.mask,
                });
                merged.push(Ace::Access(entry));
            }
            Err(ace) => merged.push(ace),
        }
    }

    let outcome = outcome.unwrap_or_else(|| {
        let index = merged.len();
        merged.push(Ace::allow(request.principal.clone(), request.mask));
        MergeOutcome::Appended { index }
    });

    trace_merge(&outcome, &request.principal, request.mask);

    Merged {
        acl: Acl::with_entries(revision, merged),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ace::{AccessAce, OpaqueAce};
    use crate::mask::AceFlags;

    const W: u32 = AccessMask::SERVICE_CHANGE_CONFIG;
    const R: u32 = AccessMask::SERVICE_QUERY_STATUS;
    const START: u32 = AccessMask::SERVICE_START;

    fn sid(sub: u32) -> Sid {
        Sid::from_parts([0, 0, 0, 0, 0, 5], &[sub]).unwrap()
    }

    fn mask(bits: u32) -> AccessMask {
        AccessMask::from_raw(bits)
    }

    #[test]
    fn inserts_between_deny_and_inherited() {
        let (x, y, z) = (sid(1), sid(2), sid(3));
        let acl = Acl::with_entries(
            2,
            vec![
                Ace::deny(x.clone(), mask(W)),
                AccessAce::allow(y.clone(), mask(R)).inherited().into(),
            ],
        );

        let merged = merge_detailed(acl, &GrantRequest::new(z.clone(), mask(START)));

        assert_eq!(
            merged.acl.entries(),
            &[
                Ace::deny(x, mask(W)),
                Ace::allow(z, mask(START)),
                AccessAce::allow(y, mask(R)).inherited().into(),
            ]
        );
        assert_eq!(
            merged.outcome,
            MergeOutcome::InsertedBeforeInherited { index: 1 }
        );
        assert!(merged.changed());
    }

    #[test]
    fn widens_existing_allow_entry() {
        let z = sid(3);
        let acl = Acl::with_entries(2, vec![Ace::allow(z.clone(), mask(R))]);

        let merged = merge_detailed(acl, &GrantRequest::new(z.clone(), mask(START)));

        assert_eq!(merged.acl.entries(), &[Ace::allow(z, mask(R | START))]);
        assert_eq!(
            merged.outcome,
            MergeOutcome::Updated {
                index: 0,
                previous: mask(R),
                current: mask(R | START)
            }
        );
        assert_eq!(merged.outcome.label(), "updated");
    }

    #[test]
    fn update_preserves_flags_and_trailing_bytes() {
        let z = sid(3);
        let original = AccessAce {
            flags: AceFlags::from_raw(AceFlags::CONTAINER_INHERIT),
            trailing: vec![7, 7, 7, 7],
            ..AccessAce::allow(z.clone(), mask(R))
        };
        let acl = Acl::with_entries(2, vec![original.clone().into()]);

        let merged = merge(acl, &GrantRequest::new(z, mask(START)));

        let expected = AccessAce {
            mask: mask(R | START),
            ..original
        };
        assert_eq!(merged.entries(), &[Ace::Access(expected)]);
    }

    #[test]
    fn already_granted_is_unchanged() {
        let z = sid(3);
        let acl = Acl::with_entries(2, vec![Ace::allow(z.clone(), mask(R | START))]);

        let merged = merge_detailed(acl.clone(), &GrantRequest::new(z, mask(START)));

        assert!(!merged.changed());
        assert_eq!(merged.outcome.label(), "unchanged");
        assert_eq!(merged.acl, acl);
    }

    #[test]
    fn appends_when_nothing_matches() {
        let acl = Acl::with_entries(
            4,
            vec![
                Ace::deny(sid(1), mask(W)),
                Ace::allow(sid(2), mask(R)),
                Ace::Opaque(OpaqueAce {
                    ace_type: 0x11,
                    flags: AceFlags::default(),
                    body: vec![1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 16, 0, 0x20, 0, 0],
                }),
            ],
        );

        let merged = merge_detailed(acl.clone(), &GrantRequest::new(sid(3), mask(START)));

        assert_eq!(merged.outcome, MergeOutcome::Appended { index: 3 });
        assert_eq!(merged.acl.revision(), 4);
        assert_eq!(&merged.acl.entries()[..3], acl.entries());
        assert_eq!(merged.acl.entries()[3], Ace::allow(sid(3), mask(START)));
    }

    #[test]
    fn empty_list_gets_single_entry() {
        let merged = merge(Acl::new(2), &GrantRequest::new(sid(4), mask(START)));
        assert_eq!(merged.entries(), &[Ace::allow(sid(4), mask(START))]);
    }

    #[test]
    fn deny_for_target_is_not_widened() {
        let z = sid(3);
        let acl = Acl::with_entries(2, vec![Ace::deny(z.clone(), mask(START))]);

        let merged = merge(acl, &GrantRequest::new(z.clone(), mask(START)));

        assert_eq!(
            merged.entries(),
            &[Ace::deny(z.clone(), mask(START)), Ace::allow(z, mask(START))]
        );
    }

    #[test]
    fn inherited_allow_for_target_gets_explicit_entry() {
        let z = sid(3);
        let inherited: Ace = AccessAce::allow(z.clone(), mask(R)).inherited().into();
        let acl = Acl::with_entries(2, vec![inherited.clone()]);

        let merged = merge_detailed(acl, &GrantRequest::new(z.clone(), mask(START)));

        assert_eq!(
            merged.outcome,
            MergeOutcome::InsertedBeforeInherited { index: 0 }
        );
        assert_eq!(merged.acl.entries(), &[Ace::allow(z, mask(START)), inherited]);
    }

    #[test]
    fn allow_after_inherited_boundary_is_left_alone() {
        let z = sid(3);
        let acl = Acl::with_entries(
            2,
            vec![
                AccessAce::allow(sid(9), mask(R)).inherited().into(),
                Ace::allow(z.clone(), mask(R)),
            ],
        );

        let merged = merge(acl, &GrantRequest::new(z.clone(), mask(START)));

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.entries()[0], Ace::allow(z.clone(), mask(START)));
        assert_eq!(merged.entries()[2], Ace::allow(z, mask(R)));
    }

    #[test]
    fn empty_mask_still_inserts() {
        let merged = merge_detailed(Acl::new(2), &GrantRequest::new(sid(4), mask(0)));
        assert!(merged.changed());
        assert_eq!(merged.acl.entries(), &[Ace::allow(sid(4), mask(0))]);
    }

    #[test]
    fn inherited_deny_after_insert_is_reported_not_reordered() {
        // An inherited deny after the insertion point stays where it is; the
        // new allow entry still lands before the first inherited entry.
        let z = sid(3);
        let acl = Acl::with_entries(
            2,
            vec![
                AccessAce::allow(sid(9), mask(R)).inherited().into(),
                AccessAce::deny(z.clone(), mask(START)).inherited().into(),
            ],
        );

        let merged = merge_detailed(acl, &GrantRequest::new(z.clone(), mask(START)));

        let index = merged.outcome.index();
        assert_eq!(index, 0);
        assert_eq!(merged.acl.entries()[0], Ace::allow(z, mask(START)));
        assert!(merged.acl.inherited_deny_after(index));
    }
}
