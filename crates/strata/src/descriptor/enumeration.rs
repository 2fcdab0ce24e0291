// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Discrete named-value descriptors over an integer base.

use crate::descriptor::atomic::{atomic_descriptor, ScalarKind};
use crate::descriptor::TypeHandle;
use crate::error::{Error, Result};
use crate::store::{store, StorageObject};

/// One named value of an enum descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    name: String,
    value: i64,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

/// A named-value descriptor over an underlying integer descriptor.
///
/// Member names are unique within the descriptor; values must fit the
/// underlying integer's domain. Declaration order is preserved.
#[derive(Debug, Clone)]
pub struct EnumType {
    handle: TypeHandle,
    members: Vec<EnumMember>,
}

impl EnumType {
    /// Build over an existing integer descriptor, inserting each member in
    /// order.
    pub fn new(underlying: &TypeHandle, members: Vec<EnumMember>) -> Result<Self> {
        let handle = TypeHandle::from_raw(
            store()
                .create_enum(underlying.raw())
                .map_err(|e| Error::Layout(format!("could not create enum datatype: {}", e)))?,
        );
        for member in &members {
            store()
                .enum_insert(handle.raw(), &member.name, member.value)
                .map_err(|e| {
                    Error::Layout(format!(
                        "could not add member '{}' to enum datatype: {}",
                        member.name, e
                    ))
                })?;
        }
        Ok(Self { handle, members })
    }

    /// Build over a freshly created scalar descriptor.
    pub fn from_scalar(kind: ScalarKind, members: Vec<EnumMember>) -> Result<Self> {
        let underlying = atomic_descriptor(kind)?;
        Self::new(&underlying, members)
    }

    /// The two-valued boolean enum, `FALSE = 0` and `TRUE = 1` over a signed
    /// byte.
    pub fn boolean() -> Result<Self> {
        Self::from_scalar(
            ScalarKind::I8,
            vec![EnumMember::new("FALSE", 0), EnumMember::new("TRUE", 1)],
        )
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Value of the member called `name`.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }

    /// Name of the first member holding `value`.
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.name.as_str())
    }

    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }

    /// Durably register this descriptor in `object`'s namespace under
    /// `name`.
    pub fn commit(&self, object: &StorageObject, name: &str) -> Result<()> {
        object.commit(name, self.handle.raw())
    }
}

impl From<EnumType> for TypeHandle {
    fn from(e: EnumType) -> Self {
        e.handle
    }
}
