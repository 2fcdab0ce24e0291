// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! The backing type store.
//!
//! Descriptors in the public API are thin wrappers over reference-counted
//! records held in a process-wide arena. Records are addressed by opaque
//! integer identifiers which the descriptor layer passes around but never
//! interprets. The store exposes the primitive operation set the format
//! defines: copy, size/class/padding queries and mutations, compound and enum
//! creation, member insertion, equivalence testing and named commits.
//!
//! Predefined native records (one per scalar width plus the single-character
//! string seed and the object-reference type) are registered during a
//! once-only initialization phase; registration order does not affect
//! lookups.

mod object;
pub(crate) mod record;

pub use object::StorageObject;

use crate::descriptor::string::{CharacterSet, StringPadding};
use crate::descriptor::DataTypeClass;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use record::{CompoundField, EnumField, FloatFields, StrLength, TypeRecord};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Opaque record identifier issued by the store.
pub type RawTypeId = u64;

/// Sentinel identifier of the empty handle.
pub const INVALID_TYPE_ID: RawTypeId = 0;

/// Sentinel length marking a string record as variable-length.
pub(crate) const STR_VARIABLE: usize = usize::MAX;

/// Byte width of a stored object reference token.
const REF_SIZE: usize = 8;

/// Predefined native records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Native {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    B8,
    /// Single-character string seed; string builders copy and resize it.
    CString,
    RefObj,
}

struct Entry {
    refs: u32,
    record: TypeRecord,
}

#[derive(Default)]
struct StoreInner {
    next_id: RawTypeId,
    entries: HashMap<RawTypeId, Entry>,
}

impl StoreInner {
    fn get(&self, id: RawTypeId) -> Result<&TypeRecord> {
        self.entries
            .get(&id)
            .map(|e| &e.record)
            .ok_or_else(|| Error::TypeDescriptor(format!("no datatype with id {}", id)))
    }

    fn get_mut(&mut self, id: RawTypeId) -> Result<&mut TypeRecord> {
        self.entries
            .get_mut(&id)
            .map(|e| &mut e.record)
            .ok_or_else(|| Error::TypeDescriptor(format!("no datatype with id {}", id)))
    }

    fn insert(&mut self, record: TypeRecord) -> RawTypeId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.insert(id, Entry { refs: 1, record });
        id
    }

    /// Shallow copy: the new record shares (and co-owns) any child records.
    fn copy(&mut self, id: RawTypeId) -> Result<RawTypeId> {
        let record = self.get(id)?.clone();
        for child in record.children() {
            self.incref(child)?;
        }
        Ok(self.insert(record))
    }

    fn incref(&mut self, id: RawTypeId) -> Result<()> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| Error::Reference(format!("no datatype with id {}", id)))?;
        entry.refs += 1;
        Ok(())
    }

    fn decref(&mut self, id: RawTypeId) -> Result<()> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| Error::Reference(format!("no datatype with id {}", id)))?;
        entry.refs -= 1;
        if entry.refs == 0 {
            let record = self.entries.remove(&id).map(|e| e.record);
            if let Some(record) = record {
                for child in record.children() {
                    // Child release failures would mean arena corruption;
                    // surface them to the caller.
                    self.decref(child)?;
                }
            }
        }
        Ok(())
    }

    fn size_of(&self, id: RawTypeId) -> Result<usize> {
        let size = match self.get(id)? {
            TypeRecord::Integer { size, .. }
            | TypeRecord::Float { size, .. }
            | TypeRecord::BitField { size }
            | TypeRecord::Compound { size, .. } => *size,
            TypeRecord::String { length, .. } => match length {
                StrLength::Fixed(n) => *n,
                // In memory a variable-length string occupies one pointer slot.
                StrLength::Variable => std::mem::size_of::<usize>(),
            },
            TypeRecord::Reference => REF_SIZE,
            TypeRecord::Enum { base, .. } => self.size_of(*base)?,
        };
        Ok(size)
    }

    /// Structural type equivalence, recursing through compound members and
    /// enum bases.
    fn equal(&self, a: RawTypeId, b: RawTypeId) -> Result<bool> {
        if a == b {
            return Ok(true);
        }
        let (ra, rb) = (self.get(a)?, self.get(b)?);
        let eq = match (ra, rb) {
            (
                TypeRecord::Integer { size, signed },
                TypeRecord::Integer {
                    size: so,
                    signed: go,
                },
            ) => size == so && signed == go,
            (
                TypeRecord::Float {
                    size,
                    fields,
                    ebias,
                },
                TypeRecord::Float {
                    size: so,
                    fields: fo,
                    ebias: bo,
                },
            ) => size == so && fields == fo && ebias == bo,
            (TypeRecord::BitField { size }, TypeRecord::BitField { size: so }) => size == so,
            (
                TypeRecord::String {
                    length,
                    cset,
                    padding,
                },
                TypeRecord::String {
                    length: lo,
                    cset: co,
                    padding: po,
                },
            ) => length == lo && cset == co && padding == po,
            (TypeRecord::Reference, TypeRecord::Reference) => true,
            (
                TypeRecord::Compound { size, members },
                TypeRecord::Compound {
                    size: so,
                    members: mo,
                },
            ) => {
                if size != so || members.len() != mo.len() {
                    false
                } else {
                    let mut same = true;
                    for (m, o) in members.iter().zip(mo.iter()) {
                        if m.name != o.name || m.offset != o.offset || !self.equal(m.ty, o.ty)? {
                            same = false;
                            break;
                        }
                    }
                    same
                }
            }
            (
                TypeRecord::Enum { base, members },
                TypeRecord::Enum {
                    base: bo,
                    members: mo,
                },
            ) => members == mo && self.equal(*base, *bo)?,
            _ => false,
        };
        Ok(eq)
    }
}

/// The process-wide type store.
pub(crate) struct TypeStore {
    inner: RwLock<StoreInner>,
    natives: HashMap<Native, RawTypeId>,
}

/// Access the process-wide store, initializing the native registry on first
/// use.
pub(crate) fn store() -> &'static TypeStore {
    static STORE: OnceLock<TypeStore> = OnceLock::new();
    STORE.get_or_init(TypeStore::with_natives)
}

impl TypeStore {
    fn with_natives() -> Self {
        let mut inner = StoreInner::default();
        let mut natives = HashMap::new();

        let ieee_single = FloatFields {
            sign_pos: 31,
            exp_pos: 23,
            exp_size: 8,
            man_pos: 0,
            man_size: 23,
        };
        let ieee_double = FloatFields {
            sign_pos: 63,
            exp_pos: 52,
            exp_size: 11,
            man_pos: 0,
            man_size: 52,
        };

        let int = |size, signed| TypeRecord::Integer { size, signed };
        let entries: [(Native, TypeRecord); 13] = [
            (Native::I8, int(1, true)),
            (Native::I16, int(2, true)),
            (Native::I32, int(4, true)),
            (Native::I64, int(8, true)),
            (Native::U8, int(1, false)),
            (Native::U16, int(2, false)),
            (Native::U32, int(4, false)),
            (Native::U64, int(8, false)),
            (
                Native::F32,
                TypeRecord::Float {
                    size: 4,
                    fields: ieee_single,
                    ebias: 127,
                },
            ),
            (
                Native::F64,
                TypeRecord::Float {
                    size: 8,
                    fields: ieee_double,
                    ebias: 1023,
                },
            ),
            (Native::B8, TypeRecord::BitField { size: 1 }),
            (
                Native::CString,
                TypeRecord::String {
                    length: StrLength::Fixed(1),
                    cset: CharacterSet::Ascii,
                    padding: StringPadding::NullTerminated,
                },
            ),
            (Native::RefObj, TypeRecord::Reference),
        ];

        // Insertion order is irrelevant: each native gets a fresh id and the
        // lookup table is keyed by kind.
        for (native, record) in entries {
            let id = inner.insert(record);
            natives.insert(native, id);
        }

        TypeStore {
            inner: RwLock::new(inner),
            natives,
        }
    }

    /// Identifier of a predefined native record. Never released; callers must
    /// [`copy`](Self::copy) before mutating.
    pub(crate) fn native(&self, native: Native) -> RawTypeId {
        // The table is fully populated at construction.
        self.natives.get(&native).copied().unwrap_or(INVALID_TYPE_ID)
    }

    pub(crate) fn copy(&self, id: RawTypeId) -> Result<RawTypeId> {
        self.inner.write().copy(id)
    }

    pub(crate) fn incref(&self, id: RawTypeId) -> Result<()> {
        self.inner.write().incref(id)
    }

    pub(crate) fn decref(&self, id: RawTypeId) -> Result<()> {
        self.inner.write().decref(id)
    }

    pub(crate) fn get_size(&self, id: RawTypeId) -> Result<usize> {
        self.inner.read().size_of(id)
    }

    pub(crate) fn get_class(&self, id: RawTypeId) -> Result<DataTypeClass> {
        Ok(self.inner.read().get(id)?.class())
    }

    pub(crate) fn is_variable_str(&self, id: RawTypeId) -> Result<bool> {
        match self.inner.read().get(id)? {
            TypeRecord::String { length, .. } => Ok(*length == StrLength::Variable),
            _ => Ok(false),
        }
    }

    pub(crate) fn get_cset(&self, id: RawTypeId) -> Result<CharacterSet> {
        match self.inner.read().get(id)? {
            TypeRecord::String { cset, .. } => Ok(*cset),
            _ => Err(Error::TypeDescriptor(
                "cannot get cset of a non-string datatype".into(),
            )),
        }
    }

    pub(crate) fn get_strpad(&self, id: RawTypeId) -> Result<StringPadding> {
        match self.inner.read().get(id)? {
            TypeRecord::String { padding, .. } => Ok(*padding),
            _ => Err(Error::TypeDescriptor(
                "cannot get strpad of a non-string datatype".into(),
            )),
        }
    }

    /// Resize a record. For strings [`STR_VARIABLE`] marks the length as
    /// carried out-of-band.
    pub(crate) fn set_size(&self, id: RawTypeId, size: usize) -> Result<()> {
        match self.inner.write().get_mut(id)? {
            TypeRecord::String { length, .. } => {
                *length = if size == STR_VARIABLE {
                    StrLength::Variable
                } else {
                    StrLength::Fixed(size)
                };
                Ok(())
            }
            TypeRecord::Integer { size: s, .. }
            | TypeRecord::Float { size: s, .. }
            | TypeRecord::BitField { size: s } => {
                *s = size;
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot set size of this datatype class".into(),
            )),
        }
    }

    pub(crate) fn set_cset(&self, id: RawTypeId, cset: CharacterSet) -> Result<()> {
        match self.inner.write().get_mut(id)? {
            TypeRecord::String { cset: c, .. } => {
                *c = cset;
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot set cset of a non-string datatype".into(),
            )),
        }
    }

    pub(crate) fn set_strpad(&self, id: RawTypeId, padding: StringPadding) -> Result<()> {
        match self.inner.write().get_mut(id)? {
            TypeRecord::String { padding: p, .. } => {
                *p = padding;
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot set strpad of a non-string datatype".into(),
            )),
        }
    }

    /// Override the bit-field layout of a floating-point record.
    pub(crate) fn set_float_fields(&self, id: RawTypeId, new: FloatFields) -> Result<()> {
        match self.inner.write().get_mut(id)? {
            TypeRecord::Float { fields, .. } => {
                *fields = new;
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot set float fields of a non-float datatype".into(),
            )),
        }
    }

    pub(crate) fn set_float_ebias(&self, id: RawTypeId, bias: u32) -> Result<()> {
        match self.inner.write().get_mut(id)? {
            TypeRecord::Float { ebias, .. } => {
                *ebias = bias;
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot set exponent bias of a non-float datatype".into(),
            )),
        }
    }

    /// Create an empty compound record with the given total byte size.
    pub(crate) fn create_compound(&self, size: usize) -> Result<RawTypeId> {
        if size == 0 {
            return Err(Error::TypeDescriptor(
                "cannot create a zero-sized compound datatype".into(),
            ));
        }
        Ok(self.inner.write().insert(TypeRecord::Compound {
            size,
            members: Vec::new(),
        }))
    }

    /// Insert a named member at `offset`. The member record is copied into
    /// the compound, which owns the copy for its own lifetime.
    pub(crate) fn insert_member(
        &self,
        id: RawTypeId,
        name: &str,
        offset: usize,
        member: RawTypeId,
    ) -> Result<()> {
        let mut inner = self.inner.write();
        let member_size = inner.size_of(member)?;
        match inner.get(id)? {
            TypeRecord::Compound { size, members } => {
                if members.iter().any(|m| m.name == name) {
                    return Err(Error::TypeDescriptor(format!(
                        "compound datatype already has a member named '{}'",
                        name
                    )));
                }
                if offset + member_size > *size {
                    return Err(Error::TypeDescriptor(format!(
                        "member '{}' at offset {} overruns compound size",
                        name, offset
                    )));
                }
            }
            _ => {
                return Err(Error::TypeDescriptor(
                    "cannot insert a member into a non-compound datatype".into(),
                ))
            }
        }
        let owned = inner.copy(member)?;
        match inner.get_mut(id)? {
            TypeRecord::Compound { members, .. } => {
                members.push(CompoundField {
                    name: name.to_owned(),
                    offset,
                    ty: owned,
                });
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot insert a member into a non-compound datatype".into(),
            )),
        }
    }

    pub(crate) fn member_count(&self, id: RawTypeId) -> Result<usize> {
        match self.inner.read().get(id)? {
            TypeRecord::Compound { members, .. } => Ok(members.len()),
            _ => Err(Error::TypeDescriptor(
                "cannot get members of a non-compound datatype".into(),
            )),
        }
    }

    /// Copy of the `index`-th member's record; the caller releases it.
    pub(crate) fn member_type(&self, id: RawTypeId, index: usize) -> Result<RawTypeId> {
        let mut inner = self.inner.write();
        let ty = match inner.get(id)? {
            TypeRecord::Compound { members, .. } => members
                .get(index)
                .map(|m| m.ty)
                .ok_or_else(|| Error::TypeDescriptor(format!("no member at index {}", index)))?,
            _ => {
                return Err(Error::TypeDescriptor(
                    "cannot get members of a non-compound datatype".into(),
                ))
            }
        };
        inner.copy(ty)
    }

    /// Create an empty enum record over a copy of `base`, which must be an
    /// integer record.
    pub(crate) fn create_enum(&self, base: RawTypeId) -> Result<RawTypeId> {
        let mut inner = self.inner.write();
        if inner.get(base)?.class() != DataTypeClass::Integer {
            return Err(Error::TypeDescriptor(
                "enum datatypes require an integer base".into(),
            ));
        }
        let owned = inner.copy(base)?;
        Ok(inner.insert(TypeRecord::Enum {
            base: owned,
            members: Vec::new(),
        }))
    }

    /// Insert a named value; the value must fit the base integer's domain.
    pub(crate) fn enum_insert(&self, id: RawTypeId, name: &str, value: i64) -> Result<()> {
        let mut inner = self.inner.write();
        let (base_size, base_signed) = match inner.get(id)? {
            TypeRecord::Enum { base, members } => {
                if members.iter().any(|m| m.name == name) {
                    return Err(Error::TypeDescriptor(format!(
                        "enum datatype already has a member named '{}'",
                        name
                    )));
                }
                match inner.get(*base)? {
                    TypeRecord::Integer { size, signed } => (*size, *signed),
                    _ => {
                        return Err(Error::TypeDescriptor(
                            "enum base record is not an integer".into(),
                        ))
                    }
                }
            }
            _ => {
                return Err(Error::TypeDescriptor(
                    "cannot insert a value into a non-enum datatype".into(),
                ))
            }
        };
        if !value_in_domain(value, base_size, base_signed) {
            return Err(Error::TypeDescriptor(format!(
                "enum value {} does not fit the underlying integer",
                value
            )));
        }
        match inner.get_mut(id)? {
            TypeRecord::Enum { members, .. } => {
                members.push(EnumField {
                    name: name.to_owned(),
                    value,
                });
                Ok(())
            }
            _ => Err(Error::TypeDescriptor(
                "cannot insert a value into a non-enum datatype".into(),
            )),
        }
    }

    pub(crate) fn equal(&self, a: RawTypeId, b: RawTypeId) -> Result<bool> {
        self.inner.read().equal(a, b)
    }

    #[cfg(test)]
    pub(crate) fn ref_count(&self, id: RawTypeId) -> Option<u32> {
        self.inner.read().entries.get(&id).map(|e| e.refs)
    }
}

/// Does `value` fit an integer of `size` bytes with the given signedness?
fn value_in_domain(value: i64, size: usize, signed: bool) -> bool {
    let bits = size as u32 * 8;
    if signed {
        if bits >= 64 {
            return true;
        }
        let max = (1i64 << (bits - 1)) - 1;
        let min = -(1i64 << (bits - 1));
        value >= min && value <= max
    } else {
        if value < 0 {
            return false;
        }
        if bits >= 64 {
            return true;
        }
        value < (1i64 << bits)
    }
}
