#![cfg(windows)]
#![allow(unsafe_code)]

//! # Windows DACL access
//!
//! Reads and writes the DACL of services and files through
//! `GetNamedSecurityInfoW` / `SetNamedSecurityInfoW`.
//!
//! The security descriptor returned by the read is owned by a
//! [`LocalDescriptor`] guard, released with `LocalFree` on every exit path.
//! The DACL bytes are copied out of it using the size the ACL header
//! declares.

use std::ptr;

use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_PATH_NOT_FOUND, ERROR_SERVICE_DOES_NOT_EXIST,
    ERROR_SUCCESS, HLOCAL, LocalFree, WIN32_ERROR,
};
use windows::Win32::Security::Authorization::{
    GetNamedSecurityInfoW, SE_FILE_OBJECT, SE_OBJECT_TYPE, SE_SERVICE, SetNamedSecurityInfoW,
};
use windows::Win32::Security::{ACL, DACL_SECURITY_INFORMATION, PSECURITY_DESCRIPTOR};
use windows::core::PCWSTR;

use crate::provider::{ObjectKind, ProviderStatus, SecurityInfo, SecurityInfoProvider};

/// Provider backed by the Win32 security API.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProvider;

impl NativeProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Owns a descriptor allocated by the security API.
struct LocalDescriptor(PSECURITY_DESCRIPTOR);

impl Drop for LocalDescriptor {
    fn drop(&mut self) {
        if !self.0.0.is_null() {
            // SAFETY: the pointer was allocated by GetNamedSecurityInfoW and
            // is freed exactly once here.
            unsafe {
                let _ = LocalFree(Some(HLOCAL(self.0.0)));
            }
        }
    }
}

fn wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

const fn object_type(kind: ObjectKind) -> SE_OBJECT_TYPE {
    match kind {
        ObjectKind::Service => SE_SERVICE,
        ObjectKind::File => SE_FILE_OBJECT,
    }
}

fn status(code: WIN32_ERROR) -> ProviderStatus {
    match code {
        ERROR_ACCESS_DENIED => ProviderStatus::AccessDenied,
        ERROR_SERVICE_DOES_NOT_EXIST | ERROR_FILE_NOT_FOUND | ERROR_PATH_NOT_FOUND => {
            ProviderStatus::NotFound
        }
        other => ProviderStatus::Other(other.0),
    }
}

/// Copies `bytes` into a buffer aligned for the native ACL header.
fn aligned_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_ne_bytes(word)
        })
        .collect()
}

impl SecurityInfoProvider for NativeProvider {
    fn get_dacl(&self, object: &str, kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus> {
        let name = wide(object);
        let mut dacl: *mut ACL = ptr::null_mut();
        let mut raw = PSECURITY_DESCRIPTOR::default();

        // SAFETY: `name` is NUL-terminated and outlives the call; the out
        // pointers reference live locals.
        let code = unsafe {
            GetNamedSecurityInfoW(
                PCWSTR(name.as_ptr()),
                object_type(kind),
                DACL_SECURITY_INFORMATION,
                None,
                None,
                Some(&mut dacl),
                None,
                &mut raw,
            )
        };
        let descriptor = LocalDescriptor(raw);
        if code != ERROR_SUCCESS {
            return Err(status(code));
        }
        if dacl.is_null() {
            return Ok(SecurityInfo::null_dacl());
        }

        // SAFETY: `dacl` points into the descriptor held by `descriptor`,
        // which stays alive until the end of this function. AclSize covers
        // the whole ACL allocation.
        let bytes = unsafe {
            let size = usize::from((*dacl).AclSize);
            std::slice::from_raw_parts(dacl.cast::<u8>(), size).to_vec()
        };
        drop(descriptor);

        Ok(SecurityInfo::with_dacl(bytes))
    }

    fn set_dacl(
        &self,
        object: &str,
        kind: ObjectKind,
        info: &SecurityInfo,
    ) -> Result<(), ProviderStatus> {
        let name = wide(object);
        let words = info.dacl.as_deref().map(aligned_words);
        let dacl = words.as_ref().map(|words| words.as_ptr().cast::<ACL>());

        // SAFETY: `name` is NUL-terminated; `words` keeps the ACL buffer
        // alive and 4-byte aligned for the duration of the call.
        let code = unsafe {
            SetNamedSecurityInfoW(
                PCWSTR(name.as_ptr()),
                object_type(kind),
                DACL_SECURITY_INFORMATION,
                None,
                None,
                dacl,
                None,
            )
        };
        if code == ERROR_SUCCESS {
            Ok(())
        } else {
            Err(status(code))
        }
    }
}
