//! Layout constants for the native ACL buffer.
//!
//! All multi-byte fields are little-endian.
//!
//! ```text
//! ACL header (8 bytes)
//!   revision   : u8
//!   reserved   : u8   // written as zero
//!   acl_size   : u16  // total buffer size, including free space
//!   ace_count  : u16
//!   reserved   : u16  // written as zero
//! Each entry, concatenated without padding:
//!   ace_type   : u8
//!   ace_flags  : u8
//!   ace_size   : u16  // whole entry, header included
//!   mask       : u32
//!   body       : ace_size - 8 bytes  // principal for allow/deny entries
//! ```

/// Size of the fixed ACL header.
pub const ACL_HEADER_LEN: usize = 8;

/// Size of the fixed entry header (type, flags, size).
pub const ACE_HEADER_LEN: usize = 4;

/// Smallest valid entry: header plus access mask.
pub const MIN_ACE_LEN: usize = ACE_HEADER_LEN + 4;

/// Alignment applied to the total buffer size.
pub const ACL_ALIGNMENT: usize = 4;

/// Largest value the 16-bit size fields can record.
pub const MAX_ENCODED_LEN: usize = u16::MAX as usize;

/// Revision used by lists containing only standard entry types.
pub const ACL_REVISION: u8 = 2;

/// Revision used by lists that may contain object-specific entries.
pub const ACL_REVISION_DS: u8 = 4;

/// Entry type tag granting access.
pub const ACCESS_ALLOWED_ACE_TYPE: u8 = 0x00;

/// Entry type tag denying access.
pub const ACCESS_DENIED_ACE_TYPE: u8 = 0x01;

/// Rounds `len` up to the next multiple of [`ACL_ALIGNMENT`].
#[must_use]
pub const fn align_up(len: usize) -> usize {
    (len + (ACL_ALIGNMENT - 1)) & !(ACL_ALIGNMENT - 1)
}
