#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `security` applies DACL grants to named objects. It reads the current
//! list through a [`SecurityInfoProvider`], merges a grant with
//! [`acl::merge_detailed`], and writes the result back only when something
//! changed.
//!
//! # Providers
//!
//! - [`NativeProvider`] talks to the Win32 security API on Windows and
//!   reports every call as unsupported elsewhere.
//! - [`BlobProvider`] keeps exported buffers in a directory.
//! - [`MemoryProvider`] keeps them in memory and counts calls.
//!
//! # Errors
//!
//! Provider statuses, null DACLs and codec failures surface as
//! [`SecurityError`]. Every failure aborts before the write.
//!
//! # Known limitation
//!
//! The read and the write are separate calls. A concurrent change to the
//! same object between them is lost.

mod blob;
mod editor;
mod error;
mod memory;
mod provider;
mod resolver;

#[cfg(windows)]
mod native_windows;
#[cfg(not(windows))]
mod native_stub;

pub use blob::{BLOB_EXTENSION, BlobProvider};
pub use editor::{GrantOptions, GrantReport, PermissionEditor, SECURITY_TARGET};
pub use error::SecurityError;
pub use memory::MemoryProvider;
#[cfg(not(windows))]
pub use native_stub::NativeProvider;
#[cfg(windows)]
pub use native_windows::NativeProvider;
pub use provider::{ObjectKind, ProviderStatus, SecurityInfo, SecurityInfoProvider};
pub use resolver::{IdentityResolver, WellKnownResolver};
