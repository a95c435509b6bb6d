//! Ordered access-control list.

use crate::ace::Ace;
use crate::constants::{ACL_HEADER_LEN, ACL_REVISION, align_up};

/// An ordered sequence of entries plus the revision tag of its source.
///
/// Order is significant: non-inherited entries precede inherited ones, and
/// within the non-inherited prefix deny entries precede allow entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acl {
    revision: u8,
    entries: Vec<Ace>,
}

impl Acl {
    /// Creates an empty list carrying `revision`.
    #[must_use]
    pub const fn new(revision: u8) -> Self {
        Self {
            revision,
            entries: Vec::new(),
        }
    }

    /// Creates a list from entries already in their final order.
    #[must_use]
    pub const fn with_entries(revision: u8, entries: Vec<Ace>) -> Self {
        Self { revision, entries }
    }

    /// Revision tag copied from the source list.
    #[must_use]
    pub const fn revision(&self) -> u8 {
        self.revision
    }

    /// Entries in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[Ace] {
        &self.entries
    }

    /// Consumes the list, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Ace> {
        self.entries
    }

    /// Appends an entry.
    pub fn push(&mut self, ace: impl Into<Ace>) {
        self.entries.push(ace.into());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header plus the exact footprint of every entry.
    #[must_use]
    pub fn used_len(&self) -> usize {
        ACL_HEADER_LEN + self.entries.iter().map(Ace::encoded_len).sum::<usize>()
    }

    /// Size of the buffer [`encode`](crate::encode) would produce.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        align_up(self.used_len())
    }

    /// Index of the first inherited entry, if any.
    #[must_use]
    pub fn first_inherited_index(&self) -> Option<usize> {
        self.entries.iter().position(Ace::is_inherited)
    }

    /// Returns true when an inherited deny entry appears after `index`.
    #[must_use]
    pub fn inherited_deny_after(&self, index: usize) -> bool {
        self.entries
            .iter()
            .skip(index + 1)
            .any(Ace::is_inherited_deny)
    }
}

impl Default for Acl {
    fn default() -> Self {
        Self::new(ACL_REVISION)
    }
}
