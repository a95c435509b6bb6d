//! Binary principal identities and their byte-exact comparison.
//!
//! A principal is stored exactly as it appears inside an entry:
//!
//! ```text
//! revision            : u8
//! sub_authority_count : u8
//! authority           : [u8; 6]  // big-endian
//! sub_authorities     : [u32; sub_authority_count]  // little-endian
//! ```
//!
//! The bytes are kept verbatim. Equality is byte equality and nothing is
//! normalized; callers must supply canonical binary identities.

use std::fmt;
use std::str::FromStr;

use crate::error::SidError;

/// Size of the fixed identity header (revision, count, authority).
const SID_HEADER_LEN: usize = 8;

/// Largest sub-authority count the native format allows.
pub const MAX_SUB_AUTHORITIES: usize = 15;

/// Returns true when two binary identities are the same principal.
///
/// This is a pure byte-for-byte comparison. Identities of different lengths
/// are never equal.
#[must_use]
pub fn principals_equal(a: &[u8], b: &[u8]) -> bool {
    a == b
}

/// An owned binary principal identity.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Sid(Vec<u8>);

impl Sid {
    /// Builds a revision-1 identity from its authority and sub-authorities.
    pub fn from_parts(authority: [u8; 6], sub_authorities: &[u32]) -> Result<Self, SidError> {
        if sub_authorities.len() > MAX_SUB_AUTHORITIES {
            return Err(SidError::TooManySubAuthorities {
                count: sub_authorities.len(),
            });
        }

        let mut bytes = Vec::with_capacity(SID_HEADER_LEN + 4 * sub_authorities.len());
        bytes.push(1);
        bytes.push(sub_authorities.len() as u8);
        bytes.extend_from_slice(&authority);
        for sub in sub_authorities {
            bytes.extend_from_slice(&sub.to_le_bytes());
        }

        Ok(Self(bytes))
    }

    /// Validates `bytes` as exactly one identity and takes a copy.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SidError> {
        let expected = encoded_len(bytes)?;
        if expected != bytes.len() {
            return Err(SidError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Parses the identity at the start of `bytes`, returning it together
    /// with the number of bytes it occupies.
    pub fn parse_prefix(bytes: &[u8]) -> Result<(Self, usize), SidError> {
        let len = encoded_len(bytes)?;
        if len > bytes.len() {
            return Err(SidError::LengthMismatch {
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok((Self(bytes[..len].to_vec()), len))
    }

    /// Returns the raw identity bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: every identity carries at least its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true when `other` is byte-identical to this identity.
    #[must_use]
    pub fn matches(&self, other: &[u8]) -> bool {
        principals_equal(&self.0, other)
    }

    fn revision(&self) -> u8 {
        self.0[0]
    }

    fn authority(&self) -> u64 {
        self.0[2..SID_HEADER_LEN]
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
    }

    fn sub_authorities(&self) -> impl Iterator<Item = u32> + '_ {
        self.0[SID_HEADER_LEN..]
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }
}

impl AsRef<[u8]> for Sid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Length implied by the sub-authority count in the identity header.
fn encoded_len(bytes: &[u8]) -> Result<usize, SidError> {
    if bytes.len() < SID_HEADER_LEN {
        return Err(SidError::TooShort { len: bytes.len() });
    }
    let count = usize::from(bytes[1]);
    if count > MAX_SUB_AUTHORITIES {
        return Err(SidError::TooManySubAuthorities { count });
    }
    Ok(SID_HEADER_LEN + 4 * count)
}

impl fmt::Display for Sid {
    /// Renders the `S-R-I-S-S…` textual form. Authorities that do not fit in
    /// 32 bits are printed as 12 hex digits, matching the native convention.
    /// The revision byte is printed as stored, and [`FromStr`] reads it back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-", self.revision())?;
        let authority = self.authority();
        if authority >> 32 == 0 {
            write!(f, "{authority}")?;
        } else {
            write!(f, "0x{authority:012X}")?;
        }
        for sub in self.sub_authorities() {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

impl FromStr for Sid {
    type Err = SidError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || SidError::InvalidFormat {
            input: input.to_owned(),
        };

        let mut parts = input.split('-');
        match parts.next() {
            Some("S" | "s") => {}
            _ => return Err(invalid()),
        }
        let revision = parts
            .next()
            .and_then(|text| text.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        let authority_text = parts.next().ok_or_else(invalid)?;
        let authority = match authority_text
            .strip_prefix("0x")
            .or_else(|| authority_text.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| invalid())?,
            None => authority_text.parse::<u64>().map_err(|_| invalid())?,
        };
        if authority >> 48 != 0 {
            return Err(invalid());
        }
        let authority_bytes = authority.to_be_bytes();
        let mut authority_field = [0u8; 6];
        authority_field.copy_from_slice(&authority_bytes[2..]);

        let sub_authorities = parts
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sid = Self::from_parts(authority_field, &sub_authorities)?;
        sid.0[0] = revision;
        Ok(sid)
    }
}
