// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Owning wrapper around one store record identifier.

use crate::descriptor::string::StringType;
use crate::descriptor::DataTypeClass;
use crate::error::{Error, Result};
use crate::store::{store, RawTypeId, INVALID_TYPE_ID};
use std::fmt;

/// An owning, reference-counted handle to one type descriptor.
///
/// Cloning shares the backing record; the record is released when the last
/// owner goes out of scope. Equality is structural type equivalence, not
/// identity: two independently built `i32` descriptors compare equal.
///
/// An empty handle supports only [`is_empty`](Self::is_empty) and
/// assignment; every other operation on it fails.
#[derive(Debug)]
pub struct TypeHandle {
    id: RawTypeId,
}

impl TypeHandle {
    /// Wrap a store identifier, taking ownership of one reference.
    pub(crate) fn from_raw(id: RawTypeId) -> Self {
        Self { id }
    }

    /// The empty (invalid) handle.
    pub fn empty() -> Self {
        Self {
            id: INVALID_TYPE_ID,
        }
    }

    pub(crate) fn raw(&self) -> RawTypeId {
        self.id
    }

    /// Whether this handle holds the invalid sentinel.
    pub fn is_empty(&self) -> bool {
        self.id == INVALID_TYPE_ID
    }

    /// The descriptor's class.
    pub fn class(&self) -> Result<DataTypeClass> {
        store().get_class(self.id)
    }

    /// The descriptor's byte size.
    pub fn size(&self) -> Result<usize> {
        store().get_size(self.id)
    }

    /// Whether this is a variable-length string descriptor.
    pub fn is_variable_string(&self) -> Result<bool> {
        store().is_variable_str(self.id)
    }

    /// Whether this is a fixed-length string descriptor.
    pub fn is_fixed_string(&self) -> Result<bool> {
        Ok(self.class()? == DataTypeClass::String && !self.is_variable_string()?)
    }

    /// Whether this is an object-reference descriptor.
    pub fn is_reference(&self) -> bool {
        matches!(store().get_class(self.id), Ok(DataTypeClass::Reference))
    }

    /// Class-checked conversion to a [`StringType`] sharing this record.
    pub fn as_string_type(&self) -> Result<StringType> {
        if self.class()? != DataTypeClass::String {
            return Err(Error::TypeDescriptor(
                "invalid conversion to a string datatype".into(),
            ));
        }
        store()
            .incref(self.id)
            .map_err(|e| Error::Reference(format!("reference counter increase failure: {}", e)))?;
        Ok(StringType::from_handle(TypeHandle::from_raw(self.id)))
    }
}

impl Clone for TypeHandle {
    fn clone(&self) -> Self {
        if self.id != INVALID_TYPE_ID {
            // An owned live id cannot fail to incref; a failure here means
            // the arena lost the record underneath us.
            if let Err(e) = store().incref(self.id) {
                log::warn!("clone of datatype handle {} failed: {}", self.id, e);
                return Self::empty();
            }
        }
        Self { id: self.id }
    }
}

impl Drop for TypeHandle {
    fn drop(&mut self) {
        if self.id != INVALID_TYPE_ID {
            if let Err(e) = store().decref(self.id) {
                log::warn!("failed to release datatype handle {}: {}", self.id, e);
            }
        }
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        store().equal(self.id, other.id).unwrap_or(false)
    }
}

/// Renders as `"<ClassName><bit-width>"`, e.g. an 8-byte float descriptor
/// displays as `Float64`.
impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.class(), self.size()) {
            (Ok(class), Ok(size)) => write!(f, "{}{}", class.name(), size * 8),
            _ => write!(f, "{}", DataTypeClass::Invalid.name()),
        }
    }
}
