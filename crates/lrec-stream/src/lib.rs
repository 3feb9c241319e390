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

//! Streaming reader for heterogeneous CSV.
//!
//! Input is a sequence of header blocks. The first non-blank line of a block
//! names the fields; every following line up to the next blank line is a
//! data line read against those names. The next block may use a different
//! header, or one seen before.
//!
//! ```text
//! a,b,c        <- header
//! 1,2,3        <- record {a=1, b=2, c=3}
//! 4,5,6        <- record {a=4, b=5, c=6}
//!              <- end of block
//! d,e,f,g      <- new header
//! 3,4,5,6      <- record {d=3, e=4, f=5, g=6}
//! ```
//!
//! # Features
//!
//! - **Pull-based**: one record per [`StreamingReader::read`] call, or use it
//!   as an iterator
//! - **Shared headers**: every distinct field list is stored once in a
//!   [`HeaderArena`] and reused each time it reappears, across sources too
//! - **Recoverable errors**: a data line with the wrong field count is
//!   reported with its source name and line number, and reading continues
//! - **Configurable**: field and record separators, repeated separator
//!   collapsing, line length limit
//!
//! # Quick Start
//!
//! ```rust
//! use lrec_stream::{HeaderArena, StreamingReader};
//! use std::io::Cursor;
//!
//! let input = "host,port\nalpha,80\nbeta,443\n\nhost,port,tls\ngamma,8443,yes\n";
//! let arena = HeaderArena::new();
//! let mut reader = StreamingReader::from_reader(Cursor::new(input), &arena).unwrap();
//!
//! let mut hosts = Vec::new();
//! while let Some(record) = reader.read().unwrap() {
//!     hosts.push((record.get("host").unwrap().to_string(), record.len()));
//! }
//!
//! assert_eq!(hosts[0], ("alpha".to_string(), 2));
//! assert_eq!(hosts[2], ("gamma".to_string(), 3));
//! assert_eq!(reader.header_cache().len(), 2);
//! ```
//!
//! # Multiple Sources
//!
//! [`StreamingReader::begin_source`] switches to the next input while keeping
//! the header cache, so files sharing a schema share one header:
//!
//! ```rust
//! use lrec_stream::{HeaderArena, IterLineSource, StreamingReader};
//!
//! let arena = HeaderArena::new();
//! let mut reader = StreamingReader::new(IterLineSource::new(vec!["a,b", "1,2"]), &arena)
//!     .named("first");
//! let first = reader.read().unwrap().unwrap();
//!
//! reader.begin_source(IterLineSource::new(vec!["a,b", "3,4"]), "second");
//! let second = reader.read().unwrap().unwrap();
//!
//! assert!(std::ptr::eq(first.header(), second.header()));
//! assert_eq!(reader.context().record_number, 1);
//! assert_eq!(reader.context().total_records, 2);
//! ```

mod error;
mod reader;
mod stream;

pub use error::{StreamError, StreamResult};
pub use reader::{
    IterLineSource, LineReader, LineSource, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_LINE_LENGTH,
};
pub use stream::{ReaderContext, StreamingReader, StreamingReaderConfig, DEFAULT_SOURCE_NAME};

// Re-export core types for convenience
pub use lrec_core::{HeaderArena, HeaderCache, HeaderKeeper, Record};
