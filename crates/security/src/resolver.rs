//! Name to binary identity resolution.

use acl::Sid;

use crate::error::SecurityError;

/// Maps a principal name to its binary identity.
pub trait IdentityResolver {
    /// Resolves `name`.
    fn resolve(&self, name: &str) -> Result<Sid, SecurityError>;
}

const NT_AUTHORITY: [u8; 6] = [0, 0, 0, 0, 0, 5];
const WORLD_AUTHORITY: [u8; 6] = [0, 0, 0, 0, 0, 1];

/// Alias, identifier authority, sub-authorities.
const WELL_KNOWN: &[(&str, [u8; 6], &[u32])] = &[
    ("interactive", NT_AUTHORITY, &[4]),
    ("authenticated-users", NT_AUTHORITY, &[11]),
    ("everyone", WORLD_AUTHORITY, &[0]),
    ("local-system", NT_AUTHORITY, &[18]),
    ("local-service", NT_AUTHORITY, &[19]),
    ("network-service", NT_AUTHORITY, &[20]),
    ("service", NT_AUTHORITY, &[6]),
    ("administrators", NT_AUTHORITY, &[32, 544]),
    ("users", NT_AUTHORITY, &[32, 545]),
];

/// Resolves textual SIDs and a fixed table of well-known aliases.
///
/// Aliases match ASCII case-insensitively. Anything starting with `S-` is
/// parsed as a SID.
#[derive(Debug, Default, Clone, Copy)]
pub struct WellKnownResolver;

impl WellKnownResolver {
    /// The aliases this resolver knows, in table order.
    pub fn aliases() -> impl Iterator<Item = &'static str> {
        WELL_KNOWN.iter().map(|(alias, _, _)| *alias)
    }
}

impl IdentityResolver for WellKnownResolver {
    fn resolve(&self, name: &str) -> Result<Sid, SecurityError> {
        let unknown = || SecurityError::UnknownPrincipal {
            name: name.to_owned(),
        };

        if name
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("s-"))
        {
            return name.parse::<Sid>().map_err(|_| unknown());
        }

        let (_, authority, subs) = WELL_KNOWN
            .iter()
            .find(|(alias, _, _)| alias.eq_ignore_ascii_case(name))
            .ok_or_else(unknown)?;
        Sid::from_parts(*authority, subs).map_err(|_| unknown())
    }
}
