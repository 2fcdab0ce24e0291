// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! # strata — self-describing storage type descriptors
//!
//! Maps native in-memory value representations to descriptors for a binary,
//! self-describing storage format, and computes the exact byte layout
//! (offsets, padding, total size) of composite descriptors so that stored
//! metadata matches the real in-memory layout bit-for-bit.
//!
//! ## Quick Start
//!
//! ```rust
//! use strata::{describe_type, CompoundMember, CompoundType, Result, StorageObject};
//!
//! fn main() -> Result<()> {
//!     // Layout follows host struct-alignment rules: 8 + 8 + 4 (+4 trailing).
//!     let point = CompoundType::new(vec![
//!         CompoundMember::new("x", describe_type::<f64>()?),
//!         CompoundMember::new("y", describe_type::<f64>()?),
//!         CompoundMember::new("id", describe_type::<i32>()?),
//!     ])?;
//!     assert_eq!(point.size(), 24);
//!
//!     // Durably register the descriptor under a name.
//!     let object = StorageObject::new();
//!     point.commit(&object, "Point")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeHandle`] | Reference-counted owning wrapper around one descriptor |
//! | [`CompoundType`] | Struct-like descriptor with computed member offsets |
//! | [`EnumType`] | Named-value descriptor over an integer base |
//! | [`StringType`] | Fixed- or variable-length character sequences |
//! | [`FixedStringArray`] | In-memory fixed-width, null-padded text buffers |
//! | [`StorageObject`] | Namespace a descriptor can be committed into |
//!
//! This crate builds and validates type descriptors only. Bulk data
//! transfer, compression pipelines, chunking and transactions belong to the
//! access layers built on top of it.

/// Public descriptor layer (handles, factories, layout builders).
pub mod descriptor;
/// Crate-wide error type.
pub mod error;
/// Backing type store and committed-name namespaces.
mod store;

pub use descriptor::atomic::{atomic_descriptor, ScalarKind};
pub use descriptor::compound::{CompoundMember, CompoundType};
pub use descriptor::dispatch::{describe_and_verify, describe_type, NativeType, Reference};
pub use descriptor::enumeration::{EnumMember, EnumType};
pub use descriptor::fixed_string::FixedStringArray;
pub use descriptor::string::{CharacterSet, StringPadding, StringType};
pub use descriptor::{DataTypeClass, TypeHandle};
pub use error::{Error, Result};
pub use store::StorageObject;
