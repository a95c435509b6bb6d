//! Binary codec for the native ACL buffer.
//!
//! [`decode`] walks the declared entry count and rejects any buffer that
//! disagrees with its own header. [`encode`] writes the header and every
//! entry back to back, then pads the buffer with zeros up to the next
//! 4-byte boundary. Entries this crate does not interpret are copied
//! verbatim in both directions.

use crate::ace::{AccessAce, AccessKind, Ace, AceType, OpaqueAce};
use crate::constants::{ACE_HEADER_LEN, ACL_HEADER_LEN, MAX_ENCODED_LEN, MIN_ACE_LEN};
use crate::error::{AclError, Malformation};
use crate::list::Acl;
use crate::mask::{AccessMask, AceFlags};
use crate::sid::Sid;

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decodes a raw ACL buffer.
///
/// Bytes past the size declared in the header, and free space between the
/// last entry and that size, are ignored.
///
/// # Errors
///
/// Returns [`AclError::Malformed`] when the header is truncated, the
/// declared size exceeds the buffer, the declared entry count runs past the
/// end, any entry's declared size exceeds the remaining bytes, or an allow
/// or deny entry's principal does not fit inside the entry.
pub fn decode(buf: &[u8]) -> Result<Acl, AclError> {
    if buf.len() < ACL_HEADER_LEN {
        return Err(Malformation::TruncatedHeader { len: buf.len() }.into());
    }

    let revision = buf[0];
    let declared = usize::from(read_u16(buf, 2));
    let ace_count = usize::from(read_u16(buf, 4));

    if declared < ACL_HEADER_LEN {
        return Err(Malformation::DeclaredSizeTooSmall { declared }.into());
    }
    if declared > buf.len() {
        return Err(Malformation::DeclaredSizeExceedsBuffer {
            declared,
            available: buf.len(),
        }
        .into());
    }

    let region = &buf[..declared];
    let mut entries = Vec::with_capacity(ace_count);
    let mut offset = ACL_HEADER_LEN;

    for index in 0..ace_count {
        let remaining = region.len() - offset;
        if remaining < ACE_HEADER_LEN {
            return Err(Malformation::TruncatedEntryHeader { index }.into());
        }

        let size = usize::from(read_u16(region, offset + 2));
        if size < MIN_ACE_LEN {
            return Err(Malformation::EntryTooSmall {
                index,
                declared: size,
            }
            .into());
        }
        if size > remaining {
            return Err(Malformation::EntryOverrun {
                index,
                declared: size,
                remaining,
            }
            .into());
        }

        entries.push(decode_entry(index, &region[offset..offset + size])?);
        offset += size;
    }

    Ok(Acl::with_entries(revision, entries))
}

/// Decodes one entry whose bytes span exactly its declared size.
fn decode_entry(index: usize, bytes: &[u8]) -> Result<Ace, AclError> {
    let flags = AceFlags::from_raw(bytes[1]);

    let kind = match AceType::from_raw(bytes[0]) {
        AceType::AccessAllowed => AccessKind::Allow,
        AceType::AccessDenied => AccessKind::Deny,
        AceType::Other(ace_type) => {
            return Ok(Ace::Opaque(OpaqueAce {
                ace_type,
                flags,
                body: bytes[ACE_HEADER_LEN..].to_vec(),
            }));
        }
    };

    let mask = AccessMask::from_raw(read_u32(bytes, ACE_HEADER_LEN));
    let body = &bytes[MIN_ACE_LEN..];
    let (principal, used) = Sid::parse_prefix(body)
        .map_err(|source| Malformation::InvalidPrincipal { index, source })?;

    Ok(Ace::Access(AccessAce {
        kind,
        flags,
        mask,
        principal,
        trailing: body[used..].to_vec(),
    }))
}

/// Encodes a list into a freshly allocated native buffer.
///
/// The buffer holds the header followed by every entry at its exact
/// footprint, zero-padded to a 4-byte boundary. The header's size field
/// records the padded length.
///
/// # Errors
///
/// Returns [`AclError::TooLarge`] when an entry or the padded total does not
/// fit the 16-bit size fields.
pub fn encode(acl: &Acl) -> Result<Vec<u8>, AclError> {
    let total = acl.encoded_len();
    if total > MAX_ENCODED_LEN {
        return Err(AclError::TooLarge {
            size: total,
            max: MAX_ENCODED_LEN,
        });
    }
    let count = u16::try_from(acl.len()).map_err(|_| AclError::TooLarge {
        size: acl.len(),
        max: MAX_ENCODED_LEN,
    })?;

    let mut buf = Vec::with_capacity(total);
    buf.push(acl.revision());
    buf.push(0);
    buf.extend_from_slice(&(total as u16).to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&[0, 0]);

    for ace in acl.entries() {
        encode_entry(&mut buf, ace);
    }

    buf.resize(total, 0);
    Ok(buf)
}

fn encode_entry(buf: &mut Vec<u8>, ace: &Ace) {
    // Fits in u16: the aligned total was already checked against the limit.
    let size = ace.encoded_len() as u16;
    buf.push(ace.ace_type().as_raw());
    buf.push(ace.flags().as_raw());
    buf.extend_from_slice(&size.to_le_bytes());

    match ace {
        Ace::Access(entry) => {
            buf.extend_from_slice(&entry.mask.as_raw().to_le_bytes());
            buf.extend_from_slice(entry.principal.as_bytes());
            buf.extend_from_slice(&entry.trailing);
        }
        Ace::Opaque(entry) => buf.extend_from_slice(&entry.body),
    }
}

impl Acl {
    /// Parses a list from its native binary representation.
    ///
    /// See [`decode`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, AclError> {
        decode(data)
    }

    /// Serializes the list to its native binary representation.
    ///
    /// See [`encode`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, AclError> {
        encode(self)
    }
}
