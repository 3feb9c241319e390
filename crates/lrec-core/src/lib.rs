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

//! LREC Core - record model for heterogeneous CSV streams.
//!
//! A heterogeneous CSV stream is a sequence of blocks. Each block starts with a
//! header line naming the fields, continues with data lines sharing those
//! names, and ends at a blank line. Later blocks may use a different header,
//! or repeat an earlier one.
//!
//! This crate holds the pieces that do not depend on where lines come from:
//!
//! - [`split_fields`] / [`field_spans`]: split a line on a separator byte,
//!   optionally collapsing repeated separators
//! - [`HeaderArena`] / [`HeaderCache`]: own every header for the lifetime of a
//!   reader and map each distinct schema to one [`HeaderKeeper`]
//! - [`parse_data_line`]: zip a header with a data line into a [`Record`]
//!
//! The streaming state machine that drives these lives in `lrec-stream`.
//!
//! # Header lifetime
//!
//! Records borrow their keys from the header they were parsed against.
//! Headers are allocated in a [`HeaderArena`] and are only released together,
//! when the arena goes away, so records from early blocks remain usable after
//! the stream has switched to a different header:
//!
//! ```rust
//! use lrec_core::{parse_data_line, split_fields, HeaderArena, HeaderCache};
//!
//! let arena = HeaderArena::new();
//! let mut cache = HeaderCache::new(&arena);
//! let mut kept = Vec::new();
//!
//! for (header_line, data_line) in [("a,b", "1,2"), ("c", "3")] {
//!     let fields = split_fields(header_line, b',', false);
//!     let header = cache.resolve(header_line, &fields);
//!     kept.push(parse_data_line(header, data_line.to_string(), b',', false).unwrap());
//! }
//!
//! assert_eq!(kept[0].get("a"), Some("1"));
//! assert_eq!(kept[1].get("c"), Some("3"));
//! ```
//!
//! # Features
//!
//! - `serde`: implements `Serialize` for [`Record`] as an ordered map

mod error;
pub mod header;
mod parse;
pub mod record;
pub mod split;

pub use error::{CoreError, CoreResult};
pub use header::{HeaderArena, HeaderCache, HeaderKeeper};
pub use parse::parse_data_line;
pub use record::Record;
pub use split::{count_fields, field_spans, split_fields};
