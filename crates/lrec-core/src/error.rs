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

//! Error types for the LREC record model.
//!
//! Errors raised here carry no stream position. The streaming layer
//! (`lrec-stream`) lifts them into its own error type together with the
//! source name and input line number.

use thiserror::Error;

/// Errors that can occur while building records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The data line does not have the same number of fields as its header.
    ///
    /// `got > expected` means the data line had too many fields, `got < expected`
    /// means it ran out before the header did.
    #[error("Header-data length mismatch: header has {expected} fields, data line has {got}")]
    HeaderDataMismatch {
        /// Number of field names in the active header.
        expected: usize,
        /// Number of values found on the data line.
        got: usize,
    },
}

impl CoreError {
    /// Create a header/data length mismatch error.
    #[inline]
    pub fn mismatch(expected: usize, got: usize) -> Self {
        Self::HeaderDataMismatch { expected, got }
    }
}

/// Result type for record model operations.
pub type CoreResult<T> = Result<T, CoreError>;
