//! Access-control entry model.
//!
//! Allow and deny entries are decoded into [`AccessAce`]. Every other entry
//! type is kept as an [`OpaqueAce`] whose bytes travel through the codec
//! untouched.

use crate::constants::{ACCESS_ALLOWED_ACE_TYPE, ACCESS_DENIED_ACE_TYPE, ACE_HEADER_LEN};
use crate::mask::{AccessMask, AceFlags};
use crate::sid::Sid;

/// Entry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AceType {
    /// Grants the rights in the mask.
    AccessAllowed,
    /// Denies the rights in the mask.
    AccessDenied,
    /// Any other native entry type (audit, object, callback, ...).
    Other(u8),
}

impl AceType {
    /// Interprets a raw type tag.
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        match value {
            ACCESS_ALLOWED_ACE_TYPE => Self::AccessAllowed,
            ACCESS_DENIED_ACE_TYPE => Self::AccessDenied,
            other => Self::Other(other),
        }
    }

    /// Returns the raw type tag.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::AccessAllowed => ACCESS_ALLOWED_ACE_TYPE,
            Self::AccessDenied => ACCESS_DENIED_ACE_TYPE,
            Self::Other(value) => value,
        }
    }
}

/// Whether an [`AccessAce`] grants or denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Access-allowed entry.
    Allow,
    /// Access-denied entry.
    Deny,
}

/// An allow or deny entry with its principal decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessAce {
    /// Allow or deny.
    pub kind: AccessKind,
    /// Flags byte, including the inherited bit.
    pub flags: AceFlags,
    /// Rights granted or denied.
    pub mask: AccessMask,
    /// The principal the entry applies to.
    pub principal: Sid,
    /// Bytes between the end of the principal and the declared entry size.
    pub trailing: Vec<u8>,
}

impl AccessAce {
    /// A fresh, non-inherited allow entry.
    #[must_use]
    pub fn allow(principal: Sid, mask: AccessMask) -> Self {
        Self {
            kind: AccessKind::Allow,
            flags: AceFlags::default(),
            mask,
            principal,
            trailing: Vec::new(),
        }
    }

    /// A fresh, non-inherited deny entry.
    #[must_use]
    pub fn deny(principal: Sid, mask: AccessMask) -> Self {
        Self {
            kind: AccessKind::Deny,
            ..Self::allow(principal, mask)
        }
    }

    /// Returns the same entry with the inherited flag set.
    #[must_use]
    pub fn inherited(mut self) -> Self {
        self.flags = AceFlags::from_raw(self.flags.as_raw() | AceFlags::INHERITED);
        self
    }

    /// Returns true for an allow entry whose principal is byte-identical to
    /// `principal`.
    #[must_use]
    pub fn allows(&self, principal: &Sid) -> bool {
        self.kind == AccessKind::Allow && self.principal.matches(principal.as_bytes())
    }

    fn encoded_len(&self) -> usize {
        ACE_HEADER_LEN + 4 + self.principal.len() + self.trailing.len()
    }
}

/// An entry of a type this crate does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueAce {
    /// Raw type tag.
    pub ace_type: u8,
    /// Flags byte, including the inherited bit.
    pub flags: AceFlags,
    /// Everything after the 4-byte entry header, verbatim.
    pub body: Vec<u8>,
}

/// One access-control entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ace {
    /// Allow or deny entry.
    Access(AccessAce),
    /// Entry preserved byte-for-byte.
    Opaque(OpaqueAce),
}

impl Ace {
    /// A fresh, non-inherited allow entry.
    #[must_use]
    pub fn allow(principal: Sid, mask: AccessMask) -> Self {
        Self::Access(AccessAce::allow(principal, mask))
    }

    /// A fresh, non-inherited deny entry.
    #[must_use]
    pub fn deny(principal: Sid, mask: AccessMask) -> Self {
        Self::Access(AccessAce::deny(principal, mask))
    }

    /// Returns the entry type.
    #[must_use]
    pub const fn ace_type(&self) -> AceType {
        match self {
            Self::Access(ace) => match ace.kind {
                AccessKind::Allow => AceType::AccessAllowed,
                AccessKind::Deny => AceType::AccessDenied,
            },
            Self::Opaque(ace) => AceType::Other(ace.ace_type),
        }
    }

    /// Returns the flags byte.
    #[must_use]
    pub const fn flags(&self) -> AceFlags {
        match self {
            Self::Access(ace) => ace.flags,
            Self::Opaque(ace) => ace.flags,
        }
    }

    /// Returns true when the entry originated from a parent container.
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        self.flags().is_inherited()
    }

    /// Returns the access mask, when the entry is long enough to carry one.
    #[must_use]
    pub fn mask(&self) -> Option<AccessMask> {
        match self {
            Self::Access(ace) => Some(ace.mask),
            Self::Opaque(ace) => ace
                .body
                .get(..4)
                .map(|raw| AccessMask::from_raw(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))),
        }
    }

    /// Returns the decoded principal for allow and deny entries.
    #[must_use]
    pub const fn principal(&self) -> Option<&Sid> {
        match self {
            Self::Access(ace) => Some(&ace.principal),
            Self::Opaque(_) => None,
        }
    }

    /// Returns true for an inherited deny entry.
    #[must_use]
    pub fn is_inherited_deny(&self) -> bool {
        matches!(self, Self::Access(ace) if ace.kind == AccessKind::Deny && ace.flags.is_inherited())
    }

    /// Exact byte footprint of the entry, header included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Access(ace) => ace.encoded_len(),
            Self::Opaque(ace) => ACE_HEADER_LEN + ace.body.len(),
        }
    }

    /// Takes the entry apart when it is the allow entry for `principal`,
    /// handing it back unchanged otherwise.
    pub fn into_allow_for(self, principal: &Sid) -> Result<AccessAce, Self> {
        match self {
            Self::Access(ace) if ace.allows(principal) => Ok(ace),
            other => Err(other),
        }
    }
}

impl From<AccessAce> for Ace {
    fn from(ace: AccessAce) -> Self {
        Self::Access(ace)
    }
}

impl From<OpaqueAce> for Ace {
    fn from(ace: OpaqueAce) -> Self {
        Self::Opaque(ace)
    }
}
