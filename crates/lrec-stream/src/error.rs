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

//! Error types for the streaming reader.
//!
//! Every error that can be tied to an input position carries the line number
//! (1-based, counted per source). Record-level errors also carry the source
//! name so diagnostics can point at the right file when several sources are
//! read through one reader.
//!
//! # Error Categories
//!
//! - **I/O Errors**: the underlying byte stream failed
//! - **Line Errors**: invalid UTF-8, over-long lines
//! - **Record Errors**: header/data field count mismatch, data with no header
//! - **Configuration Errors**: rejected reader settings
//!
//! A record error only aborts the record being parsed. The header cache and
//! the reader state are left as they were, so reading can continue:
//!
//! ```rust
//! use lrec_core::HeaderArena;
//! use lrec_stream::{StreamError, StreamingReader};
//! use std::io::Cursor;
//!
//! let arena = HeaderArena::new();
//! let input = "a,b\n1,2\n1,2,3\n4,5\n";
//! let mut reader = StreamingReader::from_reader(Cursor::new(input), &arena).unwrap();
//!
//! let mut good = Vec::new();
//! loop {
//!     match reader.read() {
//!         Ok(Some(record)) => good.push(record),
//!         Ok(None) => break,
//!         Err(StreamError::HeaderDataMismatch { line, expected, got, .. }) => {
//!             eprintln!("line {}: expected {} fields, got {}", line, expected, got);
//!         }
//!         Err(e) => panic!("{}", e),
//!     }
//! }
//! assert_eq!(good.len(), 2);
//! ```

use thiserror::Error;

/// Errors that can occur while streaming records.
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error from the line source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 encoding.
    #[error("Invalid UTF-8 at line {line}: {message}")]
    Utf8 { line: usize, message: String },

    /// A line exceeded the configured maximum length.
    #[error("Line {line} is too long: {length} bytes exceeds limit of {limit}")]
    LineTooLong {
        line: usize,
        length: usize,
        limit: usize,
    },

    /// Data line field count differs from the active header's.
    #[error(
        "Header-data length mismatch in {input} at line {line}: expected {expected} fields, got {got}"
    )]
    HeaderDataMismatch {
        input: String,
        line: usize,
        expected: usize,
        got: usize,
    },

    /// A data line was supplied while no header was active.
    #[error("No active header in {input} at line {line}")]
    NoActiveHeader { input: String, line: usize },

    /// Rejected reader configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StreamError {
    /// Create a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Utf8 { line, .. }
            | Self::LineTooLong { line, .. }
            | Self::HeaderDataMismatch { line, .. }
            | Self::NoActiveHeader { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Get the source name if the error is tied to a record.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::HeaderDataMismatch { input, .. } | Self::NoActiveHeader { input, .. } => {
                Some(input.as_str())
            }
            _ => None,
        }
    }

    /// Whether the reader can keep going after this error.
    ///
    /// Record errors leave the reader positioned on the next line. I/O,
    /// encoding and configuration errors do not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::HeaderDataMismatch { .. } | Self::NoActiveHeader { .. }
        )
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
