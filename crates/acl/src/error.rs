//! Error types surfaced by the ACL codec and principal parser.

use thiserror::Error;

/// Structural fault found while decoding a raw ACL buffer.
///
/// Every variant means the buffer disagrees with its own declared layout.
/// Decoding stops at the first fault; no partially decoded list is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Malformation {
    /// The buffer cannot hold the fixed ACL header.
    #[error("buffer of {len} bytes is shorter than the ACL header")]
    TruncatedHeader {
        /// Length of the supplied buffer.
        len: usize,
    },
    /// The header declares more bytes than the buffer provides.
    #[error("ACL declares {declared} bytes but only {available} are available")]
    DeclaredSizeExceedsBuffer {
        /// Size recorded in the ACL header.
        declared: usize,
        /// Length of the supplied buffer.
        available: usize,
    },
    /// The header declares a size too small to hold the header itself.
    #[error("ACL declares {declared} bytes, smaller than its own header")]
    DeclaredSizeTooSmall {
        /// Size recorded in the ACL header.
        declared: usize,
    },
    /// The declared entry count runs past the end of the buffer.
    #[error("entry {index} header is truncated")]
    TruncatedEntryHeader {
        /// Zero-based index of the entry.
        index: usize,
    },
    /// An entry's declared size is larger than the bytes left in the ACL.
    #[error("entry {index} declares {declared} bytes but only {remaining} remain")]
    EntryOverrun {
        /// Zero-based index of the entry.
        index: usize,
        /// Size recorded in the entry header.
        declared: usize,
        /// Bytes remaining in the ACL when the entry was reached.
        remaining: usize,
    },
    /// An entry's declared size cannot hold its header and access mask.
    #[error("entry {index} declares {declared} bytes, below the minimum entry size")]
    EntryTooSmall {
        /// Zero-based index of the entry.
        index: usize,
        /// Size recorded in the entry header.
        declared: usize,
    },
    /// An allow or deny entry carries a principal that does not fit its size.
    #[error("entry {index} carries an invalid principal: {source}")]
    InvalidPrincipal {
        /// Zero-based index of the entry.
        index: usize,
        /// The underlying principal parse failure.
        #[source]
        source: SidError,
    },
}

/// Errors produced by the ACL codec.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AclError {
    /// The raw buffer is inconsistent with its declared structure.
    #[error("malformed ACL: {0}")]
    Malformed(#[from] Malformation),
    /// The list (or one of its entries) does not fit the 16-bit size fields
    /// of the native layout.
    #[error("encoded size of {size} bytes exceeds the {max}-byte limit")]
    TooLarge {
        /// Size that would have been written.
        size: usize,
        /// Largest size the field can carry.
        max: usize,
    },
}

impl AclError {
    /// Returns the structural fault when the error is a decode failure.
    #[must_use]
    pub const fn malformation(&self) -> Option<&Malformation> {
        match self {
            Self::Malformed(fault) => Some(fault),
            Self::TooLarge { .. } => None,
        }
    }
}

/// Errors produced while building a principal from bytes or text.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SidError {
    /// Fewer bytes than the fixed identity header.
    #[error("identity of {len} bytes is shorter than the 8-byte header")]
    TooShort {
        /// Number of bytes supplied.
        len: usize,
    },
    /// More sub-authorities than the native format allows.
    #[error("identity declares {count} sub-authorities (at most 15 allowed)")]
    TooManySubAuthorities {
        /// Declared sub-authority count.
        count: usize,
    },
    /// The byte length disagrees with the declared sub-authority count.
    #[error("identity declares {expected} bytes but {actual} were supplied")]
    LengthMismatch {
        /// Length implied by the sub-authority count.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// The textual form could not be parsed.
    #[error("invalid textual identity {input:?}")]
    InvalidFormat {
        /// The rejected input.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_includes_fault() {
        let err = AclError::from(Malformation::EntryOverrun {
            index: 2,
            declared: 40,
            remaining: 12,
        });
        assert_eq!(
            err.to_string(),
            "malformed ACL: entry 2 declares 40 bytes but only 12 remain"
        );
        assert!(matches!(
            err.malformation(),
            Some(Malformation::EntryOverrun { index: 2, .. })
        ));
    }

    #[test]
    fn too_large_has_no_malformation() {
        let err = AclError::TooLarge {
            size: 70_000,
            max: 65_535,
        };
        assert!(err.malformation().is_none());
        assert!(err.to_string().contains("70000"));
    }

    #[test]
    fn invalid_principal_chains_source() {
        use std::error::Error as _;

        let fault = Malformation::InvalidPrincipal {
            index: 0,
            source: SidError::TooShort { len: 3 },
        };
        let source = fault.source().expect("principal fault has a source");
        assert_eq!(
            source.to_string(),
            "identity of 3 bytes is shorter than the 8-byte header"
        );
    }
}
