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

//! LREC CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **cat**: print every record as key=value pairs or JSON lines
//! - **schemas**: list the distinct headers with their record counts
//! - **stats**: per-input and total record and line counts
//!
//! All commands read the given files in order through one reader, so a
//! header repeated across files is stored once. With no files they read
//! standard input.
//!
//! # Reader Options
//!
//! - `--ifs SEP`: field separator (default `comma`)
//! - `--irs SEP`: record separator (default `lf`, CRLF accepted)
//! - `--repifs`: collapse runs of the field separator
//!
//! The `LREC_MAX_LINE_LENGTH` environment variable overrides the maximum
//! line length in bytes.

pub mod cli;
pub mod commands;
pub mod error;
