// Dweve LREC - Heterogeneous CSV Record Streaming
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Field splitting.
//!
//! Splits a line into fields on a single separator byte. Splitting never
//! touches the input: fields are returned either as byte ranges into the line
//! ([`field_spans`]) or as borrowed slices ([`split_fields`]).
//!
//! An empty line splits to an empty sequence. The reader uses this as the
//! schema boundary sentinel, so `""` and `","` are deliberately different:
//! the second one is a line with two empty fields.
//!
//! When `allow_repeat` is set, runs of consecutive separators count as one.
//! Only separators *following* a field are collapsed; a leading separator
//! still produces an empty first field.
//!
//! ```rust
//! use lrec_core::split_fields;
//!
//! assert_eq!(split_fields("a,b,c", b',', false), vec!["a", "b", "c"]);
//! assert_eq!(split_fields("a,,b", b',', false), vec!["a", "", "b"]);
//! assert_eq!(split_fields("a,,b", b',', true), vec!["a", "b"]);
//! assert!(split_fields("", b',', true).is_empty());
//! ```

use memchr::memchr;
use std::ops::Range;

/// Split `line` on `separator` and return the byte range of every field.
///
/// `separator` must be an ASCII byte so that every returned range starts and
/// ends on a char boundary.
///
/// # Panics
///
/// Panics if `separator` is not ASCII.
pub fn field_spans(line: &str, separator: u8, allow_repeat: bool) -> Vec<Range<usize>> {
    assert!(separator.is_ascii(), "separator must be ASCII, got {separator:#04x}");

    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    if bytes.is_empty() {
        return spans;
    }

    let mut start = 0;
    while let Some(offset) = memchr(separator, &bytes[start..]) {
        let end = start + offset;
        spans.push(start..end);

        let mut next = end + 1;
        if allow_repeat {
            while next < bytes.len() && bytes[next] == separator {
                next += 1;
            }
        }
        start = next;
    }
    spans.push(start..bytes.len());

    spans
}

/// Split `line` on `separator` and return the fields as slices of `line`.
///
/// # Panics
///
/// Panics if `separator` is not ASCII.
#[inline]
pub fn split_fields(line: &str, separator: u8, allow_repeat: bool) -> Vec<&str> {
    field_spans(line, separator, allow_repeat)
        .into_iter()
        .map(|span| &line[span])
        .collect()
}

/// Count the fields `line` would split into, without allocating.
pub fn count_fields(line: &str, separator: u8, allow_repeat: bool) -> usize {
    let bytes = line.as_bytes();
    if bytes.is_empty() {
        return 0;
    }

    let mut count = 1;
    let mut start = 0;
    while let Some(offset) = memchr(separator, &bytes[start..]) {
        count += 1;
        let mut next = start + offset + 1;
        if allow_repeat {
            while next < bytes.len() && bytes[next] == separator {
                next += 1;
            }
        }
        start = next;
    }
    count
}
