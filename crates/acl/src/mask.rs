//! Access masks and entry flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Entry flags byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AceFlags(u8);

impl AceFlags {
    /// Non-container child objects inherit the entry.
    pub const OBJECT_INHERIT: u8 = 0x01;
    /// Container child objects inherit the entry.
    pub const CONTAINER_INHERIT: u8 = 0x02;
    /// Inheritance stops at the immediate children.
    pub const NO_PROPAGATE_INHERIT: u8 = 0x04;
    /// The entry only propagates; it does not apply to this object.
    pub const INHERIT_ONLY: u8 = 0x08;
    /// The entry was propagated from a parent container.
    pub const INHERITED: u8 = 0x10;
    /// Audit successful accesses (audit entries only).
    pub const SUCCESSFUL_ACCESS: u8 = 0x40;
    /// Audit failed accesses (audit entries only).
    pub const FAILED_ACCESS: u8 = 0x80;

    /// Creates flags from the raw byte.
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw flags byte.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        self.0
    }

    /// Checks if a flag is set.
    #[must_use]
    pub const fn contains(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Returns true when the entry originated from a parent container.
    #[must_use]
    pub const fn is_inherited(self) -> bool {
        self.contains(Self::INHERITED)
    }
}

/// Bitset of granted or denied rights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessMask(u32);

impl AccessMask {
    /// Query the service configuration.
    pub const SERVICE_QUERY_CONFIG: u32 = 0x0001;
    /// Change the service configuration.
    pub const SERVICE_CHANGE_CONFIG: u32 = 0x0002;
    /// Query the service status.
    pub const SERVICE_QUERY_STATUS: u32 = 0x0004;
    /// Enumerate dependent services.
    pub const SERVICE_ENUMERATE_DEPENDENTS: u32 = 0x0008;
    /// Start the service.
    pub const SERVICE_START: u32 = 0x0010;
    /// Stop the service.
    pub const SERVICE_STOP: u32 = 0x0020;
    /// Pause or continue the service.
    pub const SERVICE_PAUSE_CONTINUE: u32 = 0x0040;
    /// Ask the service to report its status.
    pub const SERVICE_INTERROGATE: u32 = 0x0080;
    /// Send a user-defined control code.
    pub const SERVICE_USER_DEFINED_CONTROL: u32 = 0x0100;

    /// Delete the object.
    pub const DELETE: u32 = 0x0001_0000;
    /// Read the security descriptor (excluding the audit list).
    pub const READ_CONTROL: u32 = 0x0002_0000;
    /// Modify the discretionary ACL.
    pub const WRITE_DAC: u32 = 0x0004_0000;
    /// Change the owner.
    pub const WRITE_OWNER: u32 = 0x0008_0000;
    /// Standard rights required by every `*_ALL_ACCESS` mask.
    pub const STANDARD_RIGHTS_REQUIRED: u32 = 0x000F_0000;

    /// Every service-specific right plus the required standard rights.
    pub const SERVICE_ALL_ACCESS: u32 = Self::STANDARD_RIGHTS_REQUIRED | 0x01FF;

    /// Creates a mask from raw value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw mask value.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns true when every bit of `bits` is present.
    #[must_use]
    pub const fn contains(self, bits: u32) -> bool {
        self.0 & bits == bits
    }

    /// Returns the union of both masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true when no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AccessMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for AccessMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl From<u32> for AccessMask {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
