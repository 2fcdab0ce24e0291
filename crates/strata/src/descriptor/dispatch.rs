// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Static dispatch from native Rust types to descriptors.

use crate::descriptor::atomic::{atomic_descriptor, ScalarKind};
use crate::descriptor::enumeration::EnumType;
use crate::descriptor::fixed_string::FixedStringArray;
use crate::descriptor::string::{CharacterSet, StringPadding, StringType};
use crate::descriptor::TypeHandle;
use crate::error::{Error, Result};

/// An opaque stored-object reference token, the in-memory counterpart of a
/// reference descriptor. Its contents belong to the storage format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Reference([u8; 8]);

/// A native type with a descriptor mapping.
///
/// The set of implementations is closed: scalars, `bool`, `String`,
/// [`Reference`] and [`FixedStringArray`]. Atomic kinds cannot be arrays, so
/// no array type implements this beyond the fixed-length string exception —
/// anything else fails to compile rather than producing a wrong descriptor.
pub trait NativeType: Sized {
    /// Build the descriptor for this type.
    fn descriptor() -> Result<TypeHandle>;
}

macro_rules! scalar_native {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(impl NativeType for $ty {
            fn descriptor() -> Result<TypeHandle> {
                atomic_descriptor($kind)
            }
        })*
    };
}

scalar_native! {
    i8 => ScalarKind::I8,
    i16 => ScalarKind::I16,
    i32 => ScalarKind::I32,
    i64 => ScalarKind::I64,
    u8 => ScalarKind::U8,
    u16 => ScalarKind::U16,
    u32 => ScalarKind::U32,
    u64 => ScalarKind::U64,
    f32 => ScalarKind::F32,
    f64 => ScalarKind::F64,
}

/// Booleans are stored the way h5py stores them: a two-valued enum over a
/// signed byte.
impl NativeType for bool {
    fn descriptor() -> Result<TypeHandle> {
        EnumType::boolean().map(Into::into)
    }
}

impl NativeType for String {
    fn descriptor() -> Result<TypeHandle> {
        atomic_descriptor(ScalarKind::Text)
    }
}

impl NativeType for Reference {
    fn descriptor() -> Result<TypeHandle> {
        atomic_descriptor(ScalarKind::Reference)
    }
}

impl<const N: usize> NativeType for FixedStringArray<N> {
    fn descriptor() -> Result<TypeHandle> {
        StringType::fixed(N, StringPadding::NullTerminated, CharacterSet::Utf8).map(Into::into)
    }
}

/// Build the descriptor representing `T`.
pub fn describe_type<T: NativeType>() -> Result<TypeHandle> {
    T::descriptor()
}

/// Build the descriptor representing `T` and assert that `T`'s in-memory
/// size matches the size the descriptor declares.
///
/// Variable-length strings, fixed-length strings and references have no
/// single native `size_of` and are exempt from the check.
pub fn describe_and_verify<T: NativeType>() -> Result<TypeHandle> {
    let t = describe_type::<T>()?;
    if t.is_empty() {
        return Err(Error::Layout(
            "descriptor built for native type is empty".into(),
        ));
    }

    if t.is_variable_string()? {
        return Ok(t);
    }
    if t.is_reference() || t.is_fixed_string()? {
        return Ok(t);
    }

    let declared = t.size()?;
    let native = std::mem::size_of::<T>();
    if native != declared {
        return Err(Error::SizeMismatch { native, declared });
    }
    Ok(t)
}
