//! Provider that keeps exported DACL buffers in a directory.
//!
//! Each object lives in `<dir>/<object>.dacl` as the raw native buffer. An
//! empty file stands for a null DACL. Owner and group are not stored.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::provider::{ObjectKind, ProviderStatus, SecurityInfo, SecurityInfoProvider};

/// File extension of stored buffers.
pub const BLOB_EXTENSION: &str = "dacl";

/// Directory-backed provider for offline editing.
#[derive(Debug, Clone)]
pub struct BlobProvider {
    dir: PathBuf,
}

impl BlobProvider {
    /// Uses `dir` as the store. The directory is not created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path holding `object`'s buffer, or `None` when the name is not a
    /// single plain path component.
    ///
    /// Separators, `.`, `..` and `:` are refused on every platform; on
    /// Windows a colon starts a drive prefix or a data stream name.
    #[must_use]
    pub fn blob_path(&self, object: &str) -> Option<PathBuf> {
        if object.contains(['/', '\\', ':']) {
            return None;
        }
        let mut components = Path::new(object).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == object => {
                Some(self.dir.join(format!("{object}.{BLOB_EXTENSION}")))
            }
            _ => None,
        }
    }
}

fn status_from_io(err: &io::Error) -> ProviderStatus {
    match err.kind() {
        io::ErrorKind::NotFound => ProviderStatus::NotFound,
        io::ErrorKind::PermissionDenied => ProviderStatus::AccessDenied,
        _ => ProviderStatus::Other(err.raw_os_error().map_or(0, |code| code as u32)),
    }
}

impl SecurityInfoProvider for BlobProvider {
    fn get_dacl(&self, object: &str, _kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus> {
        let path = self.blob_path(object).ok_or(ProviderStatus::NotFound)?;
        let bytes = fs::read(&path).map_err(|err| status_from_io(&err))?;
        if bytes.is_empty() {
            Ok(SecurityInfo::null_dacl())
        } else {
            Ok(SecurityInfo::with_dacl(bytes))
        }
    }

    fn set_dacl(
        &self,
        object: &str,
        _kind: ObjectKind,
        info: &SecurityInfo,
    ) -> Result<(), ProviderStatus> {
        let path = self.blob_path(object).ok_or(ProviderStatus::NotFound)?;

        let mut staged = NamedTempFile::new_in(&self.dir).map_err(|err| status_from_io(&err))?;
        staged
            .write_all(info.dacl.as_deref().unwrap_or_default())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| status_from_io(&err))?;
        staged
            .persist(&path)
            .map_err(|err| status_from_io(&err.error))?;
        Ok(())
    }
}
