//! In-process provider.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::provider::{ObjectKind, ProviderStatus, SecurityInfo, SecurityInfoProvider};

/// Provider backed by a map, with call counters and injectable failures.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    objects: RefCell<HashMap<(ObjectKind, String), SecurityInfo>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
    read_failure: Cell<Option<ProviderStatus>>,
    write_failure: Cell<Option<ProviderStatus>>,
}

impl MemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_object(self, object: &str, kind: ObjectKind, info: SecurityInfo) -> Self {
        self.insert(object, kind, info);
        self
    }

    /// Stores `info` for `object`, replacing any previous entry.
    pub fn insert(&self, object: &str, kind: ObjectKind, info: SecurityInfo) {
        self.objects
            .borrow_mut()
            .insert((kind, object.to_owned()), info);
    }

    /// Current info for `object`, without counting as a read.
    #[must_use]
    pub fn get(&self, object: &str, kind: ObjectKind) -> Option<SecurityInfo> {
        self.objects
            .borrow()
            .get(&(kind, object.to_owned()))
            .cloned()
    }

    /// Number of `get_dacl` calls so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of `set_dacl` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Makes every following read fail with `status`.
    pub fn fail_reads(&self, status: ProviderStatus) {
        self.read_failure.set(Some(status));
    }

    /// Makes every following write fail with `status`.
    pub fn fail_writes(&self, status: ProviderStatus) {
        self.write_failure.set(Some(status));
    }
}

impl SecurityInfoProvider for MemoryProvider {
    fn get_dacl(&self, object: &str, kind: ObjectKind) -> Result<SecurityInfo, ProviderStatus> {
        self.reads.set(self.reads.get() + 1);
        if let Some(status) = self.read_failure.get() {
            return Err(status);
        }
        self.get(object, kind).ok_or(ProviderStatus::NotFound)
    }

    fn set_dacl(
        &self,
        object: &str,
        kind: ObjectKind,
        info: &SecurityInfo,
    ) -> Result<(), ProviderStatus> {
        self.writes.set(self.writes.get() + 1);
        if let Some(status) = self.write_failure.get() {
            return Err(status);
        }
        let mut objects = self.objects.borrow_mut();
        match objects.get_mut(&(kind, object.to_owned())) {
            Some(slot) => {
                *slot = info.clone();
                Ok(())
            }
            None => Err(ProviderStatus::NotFound),
        }
    }
}
