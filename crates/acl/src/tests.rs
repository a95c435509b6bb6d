//! Property tests for the grant merge and the codec.

use proptest::prelude::*;

use super::*;

fn arb_sid() -> impl Strategy<Value = Sid> {
    (any::<[u8; 6]>(), prop::collection::vec(any::<u32>(), 0..=4))
        .prop_map(|(authority, subs)| Sid::from_parts(authority, &subs).expect("at most 4 sub-authorities"))
}

fn arb_flags(inherited: bool) -> impl Strategy<Value = AceFlags> {
    any::<u8>().prop_map(move |raw| {
        let base = raw & !AceFlags::INHERITED;
        AceFlags::from_raw(if inherited { base | AceFlags::INHERITED } else { base })
    })
}

fn arb_access(inherited: bool, kind: AccessKind) -> impl Strategy<Value = Ace> {
    (
        arb_flags(inherited),
        any::<u32>(),
        arb_sid(),
        prop::collection::vec(any::<u8>(), 0..6),
    )
        .prop_map(move |(flags, mask, principal, trailing)| {
            Ace::Access(AccessAce {
                kind,
                flags,
                mask: AccessMask::from_raw(mask),
                principal,
                trailing,
            })
        })
}

fn arb_opaque(inherited: bool) -> impl Strategy<Value = Ace> {
    (
        2u8..=u8::MAX,
        arb_flags(inherited),
        prop::collection::vec(any::<u8>(), 4..24),
    )
        .prop_map(|(ace_type, flags, body)| Ace::Opaque(OpaqueAce { ace_type, flags, body }))
}

fn arb_ace(inherited: bool) -> impl Strategy<Value = Ace> {
    prop_oneof![
        arb_access(inherited, AccessKind::Allow),
        arb_access(inherited, AccessKind::Deny),
        arb_opaque(inherited),
    ]
}

/// A list whose non-inherited entries all precede its inherited ones.
fn arb_acl(max_explicit: usize, max_inherited: usize) -> impl Strategy<Value = Acl> {
    (
        any::<u8>(),
        prop::collection::vec(arb_ace(false), 0..=max_explicit),
        prop::collection::vec(arb_ace(true), 0..=max_inherited),
    )
        .prop_map(|(revision, mut explicit, inherited)| {
            explicit.extend(inherited);
            Acl::with_entries(revision, explicit)
        })
}

fn arb_request() -> impl Strategy<Value = GrantRequest> {
    (arb_sid(), any::<u32>()).prop_map(|(sid, mask)| GrantRequest::new(sid, AccessMask::from_raw(mask)))
}

fn has_explicit_allow_for(acl: &Acl, principal: &Sid) -> bool {
    acl.entries().iter().any(|ace| {
        !ace.is_inherited() && matches!(ace, Ace::Access(entry) if entry.allows(principal))
    })
}

proptest! {
    #[test]
    fn appends_when_no_inherited_and_no_match(
        acl in arb_acl(8, 0),
        request in arb_request(),
    ) {
        prop_assume!(!has_explicit_allow_for(&acl, request.principal()));

        let merged = merge_detailed(acl.clone(), &request);

        prop_assert_eq!(merged.outcome, MergeOutcome::Appended { index: acl.len() });
        prop_assert_eq!(&merged.acl.entries()[..acl.len()], acl.entries());
        prop_assert_eq!(
            &merged.acl.entries()[acl.len()],
            &Ace::allow(request.principal().clone(), request.mask())
        );
    }

    #[test]
    fn widens_existing_allow_in_place(
        before in arb_acl(4, 3),
        after_explicit in prop::collection::vec(arb_ace(false), 0..4),
        existing_flags in arb_flags(false),
        existing_mask in any::<u32>(),
        request in arb_request(),
    ) {
        // Build: explicit prefix without a match, the target entry, more
        // explicit entries, then the inherited tail from `before`.
        let split = before.first_inherited_index().unwrap_or(before.len());
        let mut entries = before.entries()[..split].to_vec();
        prop_assume!(!entries.iter().any(|ace| matches!(ace, Ace::Access(e) if e.allows(request.principal()))));
        let target_index = entries.len();
        entries.push(Ace::Access(AccessAce {
            flags: existing_flags,
            ..AccessAce::allow(request.principal().clone(), AccessMask::from_raw(existing_mask))
        }));
        entries.extend(after_explicit);
        entries.extend_from_slice(&before.entries()[split..]);
        let acl = Acl::with_entries(before.revision(), entries);

        let merged = merge(acl.clone(), &request);

        prop_assert_eq!(merged.len(), acl.len());
        for (index, (old, new)) in acl.entries().iter().zip(merged.entries()).enumerate() {
            if index == target_index {
                prop_assert_eq!(new.flags(), existing_flags);
                prop_assert_eq!(
                    new.mask().unwrap().as_raw(),
                    existing_mask | request.mask().as_raw()
                );
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn inserts_immediately_before_first_inherited(
        acl in arb_acl(6, 4),
        request in arb_request(),
    ) {
        let first_inherited = acl.first_inherited_index();
        prop_assume!(first_inherited.is_some());
        prop_assume!(!has_explicit_allow_for(&acl, request.principal()));
        let boundary = first_inherited.unwrap_or_default();

        let merged = merge_detailed(acl.clone(), &request);

        prop_assert_eq!(merged.outcome, MergeOutcome::InsertedBeforeInherited { index: boundary });
        prop_assert_eq!(&merged.acl.entries()[..boundary], &acl.entries()[..boundary]);
        prop_assert_eq!(
            &merged.acl.entries()[boundary],
            &Ace::allow(request.principal().clone(), request.mask())
        );
        prop_assert_eq!(&merged.acl.entries()[boundary + 1..], &acl.entries()[boundary..]);
    }

    #[test]
    fn merge_is_idempotent(acl in arb_acl(6, 4), request in arb_request()) {
        let once = merge(acl, &request);
        let twice = merge_detailed(once.clone(), &request);

        prop_assert!(!twice.changed());
        prop_assert_eq!(twice.acl, once);
    }

    #[test]
    fn preceding_deny_entries_stay_ahead(acl in arb_acl(8, 4), request in arb_request()) {
        let merged = merge_detailed(acl.clone(), &request);
        let index = merged.outcome.index();

        // Every deny entry that preceded the grant position in the input is
        // still found before the granted entry in the output.
        let denies_before: Vec<&Ace> = acl.entries()[..index.min(acl.len())]
            .iter()
            .filter(|ace| ace.ace_type() == AceType::AccessDenied)
            .collect();
        let output_before: Vec<&Ace> = merged.acl.entries()[..index]
            .iter()
            .filter(|ace| ace.ace_type() == AceType::AccessDenied)
            .collect();
        prop_assert_eq!(denies_before, output_before);
        prop_assert_eq!(merged.acl.revision(), acl.revision());
    }

    #[test]
    fn merged_lists_round_trip(acl in arb_acl(8, 4), request in arb_request()) {
        let merged = merge(acl, &request);
        let bytes = encode(&merged).unwrap();

        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(bytes.len(), merged.encoded_len());
        prop_assert_eq!(decode(&bytes).unwrap(), merged);
    }

    #[test]
    fn truncated_buffers_never_decode(acl in arb_acl(6, 3), cut in 1usize..64) {
        prop_assume!(!acl.is_empty());
        let bytes = encode(&acl).unwrap();
        let used = acl.used_len();
        prop_assume!(cut <= used - 8);

        // Shrink both the buffer and the declared size so the last entries
        // no longer fit.
        let shortened = used - cut;
        let mut truncated = bytes[..shortened].to_vec();
        truncated[2..4].copy_from_slice(&(shortened as u16).to_le_bytes());

        prop_assert!(matches!(decode(&truncated), Err(AclError::Malformed(_))));
    }
}
