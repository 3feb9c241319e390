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

//! Data line parsing.

use crate::error::{CoreError, CoreResult};
use crate::header::HeaderKeeper;
use crate::record::Record;
use crate::split::field_spans;

/// Parse `line` against `header`, pairing field names and values by position.
///
/// The line is split with the same separator rule used for the header. The
/// record takes ownership of `line`.
///
/// # Errors
///
/// Returns [`CoreError::HeaderDataMismatch`] when the line has more or fewer
/// values than the header has names. The header is never modified.
///
/// # Panics
///
/// Panics if `separator` is not ASCII.
///
/// # Examples
///
/// ```rust
/// use lrec_core::{parse_data_line, CoreError, HeaderArena, HeaderCache};
///
/// let arena = HeaderArena::new();
/// let mut cache = HeaderCache::new(&arena);
/// let header = cache.resolve("a,b,c", &["a", "b", "c"]);
///
/// let record = parse_data_line(header, "1,2,3".to_string(), b',', false).unwrap();
/// assert_eq!(record.get("c"), Some("3"));
///
/// let err = parse_data_line(header, "1,2".to_string(), b',', false).unwrap_err();
/// assert_eq!(err, CoreError::mismatch(3, 2));
/// ```
pub fn parse_data_line<'a>(
    header: &'a HeaderKeeper<'a>,
    line: String,
    separator: u8,
    allow_repeat: bool,
) -> CoreResult<Record<'a>> {
    let spans = field_spans(&line, separator, allow_repeat);
    if spans.len() != header.len() {
        return Err(CoreError::mismatch(header.len(), spans.len()));
    }
    Ok(Record::new(header, line, spans))
}
