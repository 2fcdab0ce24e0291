// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Public descriptor layer: handles, factories and layout builders.
//!
//! A [`TypeHandle`] wraps one store record; the builders in the submodules
//! produce handles for scalars, strings, compounds and enums. Layout rules
//! for compounds live in [`compound`].

pub mod atomic;
pub mod compound;
pub mod dispatch;
pub mod enumeration;
pub mod fixed_string;
mod handle;
pub mod string;

pub use handle::TypeHandle;

#[cfg(test)]
mod tests;

/// Classification of any descriptor.
///
/// The set is closed by the storage format. `Time`, `Opaque`, `VarLen` and
/// `Array` classes exist in the format but have no builder in this crate;
/// they still classify descriptors obtained elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeClass {
    Time,
    Integer,
    Float,
    String,
    BitField,
    Opaque,
    Compound,
    Reference,
    Enum,
    VarLen,
    Array,
    Invalid,
}

impl DataTypeClass {
    /// Human-readable class name used by descriptor text rendering.
    pub fn name(self) -> &'static str {
        match self {
            DataTypeClass::Time => "Time",
            DataTypeClass::Integer => "Integer",
            DataTypeClass::Float => "Float",
            DataTypeClass::String => "String",
            DataTypeClass::BitField => "BitField",
            DataTypeClass::Opaque => "Opaque",
            DataTypeClass::Compound => "Compound",
            DataTypeClass::Reference => "Reference",
            DataTypeClass::Enum => "Enum",
            DataTypeClass::VarLen => "Varlen",
            DataTypeClass::Array => "Array",
            DataTypeClass::Invalid => "(Invalid)",
        }
    }
}
