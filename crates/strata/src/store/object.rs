// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Named namespaces for committed descriptors.

use crate::error::{Error, Result};
use crate::store::{store, RawTypeId};
use dashmap::DashMap;

/// An opaque storage object into which finished compound/enum descriptors can
/// be durably registered under a name.
///
/// Committing binds the name to a persistent copy of the descriptor record,
/// which then outlives the in-memory wrapper it was committed from. Reopening
/// a committed descriptor by name belongs to the access layer, not this
/// crate.
#[derive(Default)]
pub struct StorageObject {
    names: DashMap<String, RawTypeId>,
}

impl StorageObject {
    /// Create an object with an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the record under `name`. Refuses duplicates; failures are
    /// surfaced, never retried.
    pub(crate) fn commit(&self, name: &str, id: RawTypeId) -> Result<()> {
        use dashmap::mapref::entry::Entry;

        let persistent = store().copy(id)?;
        match self.names.entry(name.to_owned()) {
            Entry::Occupied(_) => {
                store().decref(persistent)?;
                Err(Error::TypeDescriptor(format!(
                    "a datatype named '{}' is already committed",
                    name
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(persistent);
                log::debug!("committed datatype '{}'", name);
                Ok(())
            }
        }
    }

    /// Whether a descriptor has been committed under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Number of committed names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Drop for StorageObject {
    fn drop(&mut self) {
        for entry in self.names.iter() {
            if let Err(e) = store().decref(*entry.value()) {
                log::warn!("failed to release committed datatype: {}", e);
            }
        }
    }
}
