// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Composite descriptors and their byte layout.
//!
//! Offsets are computed under the host struct-alignment convention: a type's
//! alignment equals its size, recursively through its first member. The
//! computed layout must match the native in-memory layout bit-for-bit; a
//! mismatch silently corrupts data on read and write, so the rules here are
//! deliberately conservative and mirror the platform ABI rather than trying
//! to be clever.

use crate::descriptor::{DataTypeClass, TypeHandle};
use crate::error::{Error, Result};
use crate::store::{store, RawTypeId, StorageObject};

/// One named field of a composite descriptor.
///
/// The offset is computed by the layout pass, never user-set.
#[derive(Debug, Clone)]
pub struct CompoundMember {
    name: String,
    base: TypeHandle,
    offset: usize,
}

impl CompoundMember {
    pub fn new(name: impl Into<String>, base: impl Into<TypeHandle>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            offset: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &TypeHandle {
        &self.base
    }

    /// Byte offset within the composite, valid once the composite is built.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A struct-like descriptor with named, offset member fields.
#[derive(Debug, Clone)]
pub struct CompoundType {
    handle: TypeHandle,
    members: Vec<CompoundMember>,
    size: usize,
}

impl CompoundType {
    /// Build a composite, computing every offset and the total size under
    /// the alignment rules.
    pub fn new(members: Vec<CompoundMember>) -> Result<Self> {
        Self::create(members, 0)
    }

    /// Build a composite with a caller-asserted total size, used verbatim.
    /// Offsets are still computed; a size too small for the members fails at
    /// insertion.
    pub fn with_size(members: Vec<CompoundMember>, size: usize) -> Result<Self> {
        Self::create(members, size)
    }

    fn create(mut members: Vec<CompoundMember>, explicit_size: usize) -> Result<Self> {
        if members.is_empty() {
            return Err(Error::Layout(
                "compound datatypes need at least one member".into(),
            ));
        }

        // First pass: place every member under the alignment rules and find
        // the total size of the compound datatype.
        let mut current_size = 0usize;
        let mut max_alignment = 0usize;
        for member in &mut members {
            let member_size = member.base.size().map_err(|e| {
                Error::Layout(format!("cannot get size of member '{}': {}", member.name, e))
            })?;
            if member_size == 0 {
                return Err(Error::Layout(format!(
                    "member '{}' has zero size",
                    member.name
                )));
            }

            let unit = alignment_unit(member.base.raw())?;

            // Objects have an alignment requirement of which their size is a
            // multiple; round the running size up to the member's unit.
            member.offset = current_size + struct_padding(current_size, unit);
            current_size = member.offset + member_size;

            // The largest unit drives the trailing padding of the whole
            // compound, so arrays of it stay aligned.
            max_alignment = max_alignment.max(unit);
        }
        let computed = current_size + struct_padding(current_size, max_alignment);

        let total_size = if explicit_size != 0 {
            explicit_size
        } else {
            computed
        };

        let handle = TypeHandle::from_raw(store().create_compound(total_size)?);
        for member in &members {
            store()
                .insert_member(handle.raw(), &member.name, member.offset, member.base.raw())
                .map_err(|e| {
                    Error::Layout(format!(
                        "could not add member '{}' to compound datatype: {}",
                        member.name, e
                    ))
                })?;
        }

        log::trace!(
            "compound layout: {} members, size {} (computed {})",
            members.len(),
            total_size,
            computed
        );

        Ok(Self {
            handle,
            members,
            size: total_size,
        })
    }

    /// Members in declaration order, offsets filled in.
    pub fn members(&self) -> &[CompoundMember] {
        &self.members
    }

    /// Total byte size, trailing padding included.
    pub fn size(&self) -> usize {
        self.size
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

impl From<CompoundType> for TypeHandle {
    fn from(c: CompoundType) -> Self {
        c.handle
    }
}

/// The byte boundary a member's starting offset must respect.
///
/// Recursive first-leaf rule: a compound aligns like its first sub-member, a
/// string aligns at 1 (content length moves the end, not the start), anything
/// else aligns at its own size. Terminates at the first non-compound,
/// non-string leaf.
pub(crate) fn alignment_unit(id: RawTypeId) -> Result<usize> {
    match store().get_class(id)? {
        DataTypeClass::Compound => {
            let count = store()
                .member_count(id)
                .map_err(|e| Error::Layout(format!("cannot get members of compound: {}", e)))?;
            if count == 0 {
                return Err(Error::Layout(
                    "no members defined for compound datatype".into(),
                ));
            }
            let member = store().member_type(id, 0)?;
            let unit = alignment_unit(member);
            if let Err(e) = store().decref(member) {
                log::warn!("failed to release member datatype: {}", e);
            }
            unit
        }
        DataTypeClass::String => Ok(1),
        _ => store().get_size(id),
    }
}

/// Padding needed to round `current_size` up to the next multiple of `unit`.
///
/// The two-branch form keeps the subtraction inside unsigned range; both
/// branches agree with `current_size.next_multiple_of(unit) - current_size`.
fn struct_padding(current_size: usize, unit: usize) -> usize {
    if unit == 0 {
        return 0;
    }
    if unit >= current_size {
        (unit - current_size) % unit
    } else {
        (unit - ((current_size - unit) % unit)) % unit
    }
}
