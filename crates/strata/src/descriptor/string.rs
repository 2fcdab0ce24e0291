// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Character-sequence descriptors, fixed- and variable-length.

use crate::descriptor::TypeHandle;
use crate::error::{Error, Result};
use crate::store::{store, Native, STR_VARIABLE};

/// Padding policy of a fixed-length string descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringPadding {
    /// Content ends with a null byte inside the declared length.
    NullTerminated,
    /// Content is followed by null bytes up to the declared length.
    NullPadded,
    /// Content is followed by spaces up to the declared length.
    SpacePadded,
}

/// Character set of a string descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Ascii,
    Utf8,
}

/// A string descriptor with padding and character-set attributes.
#[derive(Debug, Clone)]
pub struct StringType {
    handle: TypeHandle,
}

impl StringType {
    pub(crate) fn from_handle(handle: TypeHandle) -> Self {
        Self { handle }
    }

    /// Fixed-length string of `length` bytes.
    ///
    /// A null-terminated string needs at least one byte to store the
    /// terminator, so `length == 0` with [`StringPadding::NullTerminated`]
    /// is refused.
    pub fn fixed(length: usize, padding: StringPadding, cset: CharacterSet) -> Result<Self> {
        if length == 0 && padding == StringPadding::NullTerminated {
            return Err(Error::Layout(
                "fixed-length, null-terminated strings need at least one byte to store the \
                 null character"
                    .into(),
            ));
        }
        let handle = copy_string_seed()?;
        store().set_size(handle.raw(), length)?;
        store().set_cset(handle.raw(), cset)?;
        store().set_strpad(handle.raw(), padding)?;
        Ok(Self { handle })
    }

    /// Variable-length string; the length is carried by the storage format,
    /// not declared as a byte count.
    pub fn variable(cset: CharacterSet) -> Result<Self> {
        let handle = copy_string_seed()?;
        store().set_size(handle.raw(), STR_VARIABLE)?;
        store().set_cset(handle.raw(), cset)?;
        Ok(Self { handle })
    }

    /// The descriptor's padding policy.
    pub fn padding(&self) -> Result<StringPadding> {
        store().get_strpad(self.handle.raw())
    }

    /// The descriptor's character set.
    pub fn character_set(&self) -> Result<CharacterSet> {
        store().get_cset(self.handle.raw())
    }

    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }
}

impl From<StringType> for TypeHandle {
    fn from(s: StringType) -> Self {
        s.handle
    }
}

fn copy_string_seed() -> Result<TypeHandle> {
    store()
        .copy(store().native(Native::CString))
        .map(TypeHandle::from_raw)
}
