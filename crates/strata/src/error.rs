// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Error types for descriptor construction and layout computation.

use std::fmt;

/// Errors returned by strata descriptor operations.
///
/// Every failure propagates synchronously to the immediate caller; nothing is
/// retried or silently recovered. The single designed exception is
/// [`FixedStringArray`](crate::FixedStringArray) truncation, which is a
/// documented policy rather than a failure.
#[derive(Debug)]
pub enum Error {
    /// The type store refused a copy/size/class/padding query or mutation.
    TypeDescriptor(String),
    /// Invalid composite or enum definition (empty member list,
    /// zero-length null-terminated string, failed member insertion).
    Layout(String),
    /// Native byte size disagrees with the descriptor byte size during
    /// verified construction.
    SizeMismatch {
        /// `size_of` the native type.
        native: usize,
        /// Byte size declared by the descriptor.
        declared: usize,
    },
    /// Reference-count adjustment failed while sharing a handle.
    Reference(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeDescriptor(msg) => write!(f, "Type descriptor error: {}", msg),
            Error::Layout(msg) => write!(f, "Layout error: {}", msg),
            Error::SizeMismatch { native, declared } => write!(
                f,
                "Size of native type {} != that of memory datatype {}",
                native, declared
            ),
            Error::Reference(msg) => write!(f, "Reference error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for API results using the public `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
