// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Fixed-capacity, null-padded text containers.

use std::borrow::Cow;

/// An in-memory sequence of fixed-width text buffers, the native counterpart
/// of a fixed-length string descriptor of width `N`.
///
/// Each element occupies exactly `N` bytes, terminator included. Appends copy
/// at most `N - 1` content bytes and always null-terminate at or before index
/// `N - 1`; overflowing input is silently truncated by design, never an
/// error. The outer sequence grows without bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedStringArray<const N: usize> {
    data: Vec<[u8; N]>,
}

impl<const N: usize> FixedStringArray<N> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Bulk construction; the per-element truncation rule applies.
    pub fn from_strings<I>(strings: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut array = Self::new();
        for s in strings {
            array.push_back(s.as_ref());
        }
        array
    }

    /// Append `text`, truncated to the first `N - 1` bytes.
    pub fn push_back(&mut self, text: &str) {
        if N == 0 {
            return;
        }
        let mut buf = [0u8; N];
        let len = (N - 1).min(text.len());
        buf[..len].copy_from_slice(&text.as_bytes()[..len]);
        self.data.push(buf);
    }

    /// Append a raw pre-formatted buffer verbatim.
    pub fn push_array(&mut self, raw: [u8; N]) {
        self.data.push(raw);
    }

    /// Stored text of element `i`, up to its first null byte. Truncation can
    /// split a multi-byte character; the tail is then rendered lossily.
    pub fn get(&self, i: usize) -> Option<Cow<'_, str>> {
        self.data.get(i).map(|buf| {
            let end = buf.iter().position(|&b| b == 0).unwrap_or(N);
            String::from_utf8_lossy(&buf[..end])
        })
    }

    /// Raw `N`-byte buffer of element `i`.
    pub fn raw(&self, i: usize) -> Option<&[u8; N]> {
        self.data.get(i)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the raw element buffers.
    pub fn iter(&self) -> impl Iterator<Item = &[u8; N]> {
        self.data.iter()
    }
}

impl<const N: usize, S: AsRef<str>> FromIterator<S> for FixedStringArray<N> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_strings(iter)
    }
}
