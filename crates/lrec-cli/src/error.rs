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

//! Structured error types for the LREC CLI.
//!
//! All command handlers return `Result<T, CliError>`; `main` prints the
//! error as `Error: ...` and exits with status 1.

use lrec_stream::StreamError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for LREC CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use lrec_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// Opening an input or writing output failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Reading records failed.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an I/O error for standard output.
    pub fn stdout(source: io::Error) -> Self {
        Self::io_error("<stdout>", source)
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
