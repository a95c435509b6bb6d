//! Console rendering of DACLs and grant reports.

use std::io::{self, Write};

use acl::{AccessKind, Ace, Acl};
use security::GrantReport;

/// Writes one line describing `report`.
///
/// ```text
/// inserted  S-1-5-4 0x00000010
/// appended  S-1-5-4 0x00000010 (dry run)
/// ```
pub fn write_report<W: Write>(out: &mut W, report: &GrantReport) -> io::Result<()> {
    let suffix = if report.changed && !report.written {
        " (dry run)"
    } else {
        ""
    };
    writeln!(
        out,
        "{:<9} {} {}{suffix}",
        report.outcome.label(),
        report.principal,
        report.mask
    )
}

fn entry_type(ace: &Ace) -> String {
    match ace {
        Ace::Access(entry) => match entry.kind {
            AccessKind::Allow => "allow".to_owned(),
            AccessKind::Deny => "deny".to_owned(),
        },
        Ace::Opaque(entry) => format!("type-0x{:02x}", entry.ace_type),
    }
}

/// Writes the revision followed by one line per entry.
///
/// ```text
/// revision 2
///   0 deny  explicit  0x00000002 S-1-5-7
///   1 allow inherited 0x00000004 S-1-5-11
/// ```
pub fn write_acl<W: Write>(out: &mut W, acl: &Acl) -> io::Result<()> {
    writeln!(out, "revision {}", acl.revision())?;
    for (index, ace) in acl.entries().iter().enumerate() {
        let origin = if ace.is_inherited() {
            "inherited"
        } else {
            "explicit"
        };
        let mask = ace
            .mask()
            .map_or_else(|| "-".to_owned(), |mask| mask.to_string());
        let principal = ace
            .principal()
            .map_or_else(|| "-".to_owned(), ToString::to_string);
        writeln!(
            out,
            "{index:>3} {:<5} {origin:<9} {mask} {principal}",
            entry_type(ace)
        )?;
    }
    Ok(())
}
