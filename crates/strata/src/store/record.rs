// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! In-store representation of one type descriptor.

use crate::descriptor::string::{CharacterSet, StringPadding};
use crate::descriptor::DataTypeClass;
use crate::store::RawTypeId;

/// Bit-field layout of a floating-point record.
///
/// Positions are bit indices from the least significant bit, the way the
/// storage format declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FloatFields {
    pub(crate) sign_pos: u8,
    pub(crate) exp_pos: u8,
    pub(crate) exp_size: u8,
    pub(crate) man_pos: u8,
    pub(crate) man_size: u8,
}

/// Declared length of a string record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrLength {
    /// Concrete byte count, terminator included where the padding demands one.
    Fixed(usize),
    /// Length is carried out-of-band by the storage format.
    Variable,
}

/// One named field of a compound record.
///
/// `ty` is a store-internal identifier owned by the enclosing record; it is
/// released together with the record.
#[derive(Debug, Clone)]
pub(crate) struct CompoundField {
    pub(crate) name: String,
    pub(crate) offset: usize,
    pub(crate) ty: RawTypeId,
}

/// One named value of an enum record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumField {
    pub(crate) name: String,
    pub(crate) value: i64,
}

/// The store's view of a type descriptor.
#[derive(Debug, Clone)]
pub(crate) enum TypeRecord {
    Integer {
        size: usize,
        signed: bool,
    },
    Float {
        size: usize,
        fields: FloatFields,
        ebias: u32,
    },
    BitField {
        size: usize,
    },
    String {
        length: StrLength,
        cset: CharacterSet,
        padding: StringPadding,
    },
    Reference,
    Compound {
        size: usize,
        members: Vec<CompoundField>,
    },
    Enum {
        /// Store-internal copy of the underlying integer record.
        base: RawTypeId,
        members: Vec<EnumField>,
    },
}

impl TypeRecord {
    pub(crate) fn class(&self) -> DataTypeClass {
        match self {
            TypeRecord::Integer { .. } => DataTypeClass::Integer,
            TypeRecord::Float { .. } => DataTypeClass::Float,
            TypeRecord::BitField { .. } => DataTypeClass::BitField,
            TypeRecord::String { .. } => DataTypeClass::String,
            TypeRecord::Reference => DataTypeClass::Reference,
            TypeRecord::Compound { .. } => DataTypeClass::Compound,
            TypeRecord::Enum { .. } => DataTypeClass::Enum,
        }
    }

    /// Identifiers of records this record owns.
    pub(crate) fn children(&self) -> Vec<RawTypeId> {
        match self {
            TypeRecord::Compound { members, .. } => members.iter().map(|m| m.ty).collect(),
            TypeRecord::Enum { base, .. } => vec![*base],
            _ => Vec::new(),
        }
    }
}
