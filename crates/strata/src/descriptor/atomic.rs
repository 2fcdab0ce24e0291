// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Scalar value kinds and their descriptor factory.

use crate::descriptor::string::{CharacterSet, StringType};
use crate::descriptor::TypeHandle;
use crate::error::{Error, Result};
use crate::store::record::FloatFields;
use crate::store::{store, Native};
use std::collections::HashMap;
use std::sync::OnceLock;

/// The closed set of native value kinds with a scalar descriptor mapping.
///
/// Anything outside this set has no descriptor; lookups for an unregistered
/// kind fail with a distinct "type not supported" error rather than a
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// IEEE-754 binary16; no native Rust counterpart, descriptor only.
    F16,
    F32,
    F64,
    /// A raw byte, classified as an 8-bit bit-field rather than an integer.
    Byte,
    /// An opaque stored-object reference token.
    Reference,
    /// Variable-length UTF-8 text.
    Text,
}

type BuilderFn = fn() -> Result<TypeHandle>;

/// Kind-to-builder registry, populated once at first use. Registration order
/// does not affect lookup correctness.
fn registry() -> &'static HashMap<ScalarKind, BuilderFn> {
    static REGISTRY: OnceLock<HashMap<ScalarKind, BuilderFn>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: HashMap<ScalarKind, BuilderFn> = HashMap::new();
        map.insert(ScalarKind::I8, || copy_native(Native::I8));
        map.insert(ScalarKind::I16, || copy_native(Native::I16));
        map.insert(ScalarKind::I32, || copy_native(Native::I32));
        map.insert(ScalarKind::I64, || copy_native(Native::I64));
        map.insert(ScalarKind::U8, || copy_native(Native::U8));
        map.insert(ScalarKind::U16, || copy_native(Native::U16));
        map.insert(ScalarKind::U32, || copy_native(Native::U32));
        map.insert(ScalarKind::U64, || copy_native(Native::U64));
        map.insert(ScalarKind::F16, build_f16);
        map.insert(ScalarKind::F32, || copy_native(Native::F32));
        map.insert(ScalarKind::F64, || copy_native(Native::F64));
        map.insert(ScalarKind::Byte, || copy_native(Native::B8));
        map.insert(ScalarKind::Reference, || copy_native(Native::RefObj));
        map.insert(ScalarKind::Text, build_text);
        map
    })
}

/// Build the descriptor for a scalar value kind.
pub fn atomic_descriptor(kind: ScalarKind) -> Result<TypeHandle> {
    let build = registry()
        .get(&kind)
        .ok_or_else(|| Error::TypeDescriptor("type not supported".into()))?;
    build()
}

fn copy_native(native: Native) -> Result<TypeHandle> {
    store().copy(store().native(native)).map(TypeHandle::from_raw)
}

/// Half-precision is derived from the single-precision record by overriding
/// its bit-field layout to the IEEE-754 binary16 shape.
fn build_f16() -> Result<TypeHandle> {
    let handle = copy_native(Native::F32)?;
    // Sign position, exponent position/width, mantissa position/width.
    store().set_float_fields(
        handle.raw(),
        FloatFields {
            sign_pos: 15,
            exp_pos: 10,
            exp_size: 5,
            man_pos: 0,
            man_size: 10,
        },
    )?;
    // Total datatype size (in bytes).
    store().set_size(handle.raw(), 2)?;
    // Floating point exponent bias.
    store().set_float_ebias(handle.raw(), 15)?;
    Ok(handle)
}

fn build_text() -> Result<TypeHandle> {
    StringType::variable(CharacterSet::Utf8).map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DataTypeClass;

    #[test]
    fn integer_widths() {
        for (kind, size) in [
            (ScalarKind::I8, 1),
            (ScalarKind::I16, 2),
            (ScalarKind::I32, 4),
            (ScalarKind::I64, 8),
            (ScalarKind::U8, 1),
            (ScalarKind::U16, 2),
            (ScalarKind::U32, 4),
            (ScalarKind::U64, 8),
        ] {
            let t = atomic_descriptor(kind).expect("descriptor");
            assert_eq!(t.class().expect("class"), DataTypeClass::Integer);
            assert_eq!(t.size().expect("size"), size);
        }
    }

    #[test]
    fn half_precision_shape() {
        let t = atomic_descriptor(ScalarKind::F16).expect("descriptor");
        assert_eq!(t.class().expect("class"), DataTypeClass::Float);
        assert_eq!(t.size().expect("size"), 2);
        assert_eq!(t.to_string(), "Float16");
    }

    #[test]
    fn byte_is_a_bitfield() {
        let t = atomic_descriptor(ScalarKind::Byte).expect("descriptor");
        assert_eq!(t.class().expect("class"), DataTypeClass::BitField);
        assert_eq!(t.size().expect("size"), 1);
    }

    #[test]
    fn text_maps_to_variable_string() {
        let t = atomic_descriptor(ScalarKind::Text).expect("descriptor");
        assert_eq!(t.class().expect("class"), DataTypeClass::String);
        assert!(t.is_variable_string().expect("query"));
    }

    #[test]
    fn reference_kind() {
        let t = atomic_descriptor(ScalarKind::Reference).expect("descriptor");
        assert!(t.is_reference());
    }
}
