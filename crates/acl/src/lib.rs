#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `acl` models a discretionary access-control list, converts it to and from
//! the native binary buffer, and grants a principal a right while keeping the
//! list's ordering intact.
//!
//! # Design
//!
//! - [`Ace`] is either an allow/deny [`AccessAce`] with a decoded principal,
//!   or an [`OpaqueAce`] carried byte-for-byte.
//! - [`decode`] / [`encode`] translate between [`Acl`] and the native
//!   length-prefixed layout described in [`constants`].
//! - [`merge`] / [`merge_detailed`] apply a [`GrantRequest`] in a single pass.
//!   The new or widened allow entry always sits after every deny entry that
//!   preceded it and before the first inherited entry.
//!
//! # Invariants
//!
//! - The revision tag of a list is never changed by a merge.
//! - Entries the merge does not act on keep their bytes and relative order.
//! - Principals compare byte-for-byte ([`principals_equal`]).
//!
//! # Examples
//!
//! ```
//! use acl::{AccessMask, Ace, Acl, GrantRequest, Sid, decode, encode, merge};
//!
//! let interactive: Sid = "S-1-5-4".parse().unwrap();
//! let mut current = Acl::new(acl::ACL_REVISION);
//! current.push(Ace::allow(
//!     interactive.clone(),
//!     AccessMask::from_raw(AccessMask::SERVICE_QUERY_STATUS),
//! ));
//!
//! let raw = encode(&current).unwrap();
//! let request = GrantRequest::new(interactive, AccessMask::from_raw(AccessMask::SERVICE_START));
//! let updated = merge(decode(&raw).unwrap(), &request);
//!
//! assert_eq!(updated.len(), 1);
//! assert_eq!(updated.entries()[0].mask().unwrap().as_raw(), 0x14);
//! ```

mod ace;
pub mod constants;
mod error;
mod list;
mod mask;
mod merge;
mod sid;
mod trace;
mod wire;

pub use ace::{AccessAce, AccessKind, Ace, AceType, OpaqueAce};
pub use constants::{ACL_REVISION, ACL_REVISION_DS};
pub use error::{AclError, Malformation, SidError};
pub use list::Acl;
pub use mask::{AccessMask, AceFlags};
pub use merge::{GrantRequest, MergeOutcome, Merged, merge, merge_detailed};
pub use sid::{MAX_SUB_AUTHORITIES, Sid, principals_equal};
#[cfg(feature = "tracing")]
pub use trace::ACL_TARGET;
pub use wire::{decode, encode};

#[cfg(test)]
mod tests;
