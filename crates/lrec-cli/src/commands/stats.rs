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

//! Stats command - record and line counts

use super::Inputs;
use crate::cli::InputArgs;
use crate::error::CliError;
use colored::Colorize;
use lrec_stream::HeaderArena;
use std::io::Write;

/// Print per-input and total counts.
///
/// Data lines with the wrong field count are counted as mismatches rather
/// than failing the command.
///
/// # Errors
///
/// Returns `Err` if an input cannot be opened or read.
pub fn stats<W: Write>(input: &InputArgs, out: &mut W) -> Result<(), CliError> {
    let config = input.config()?;
    let arena = HeaderArena::new();
    let mut inputs = Inputs::open(&input.files, config, &arena)?;

    // Mismatches are tallied per input by `Inputs`
    while inputs.next_record()?.is_some() {}

    writeln!(out, "{}", "Inputs:".bold()).map_err(CliError::stdout)?;
    let mut lines = 0;
    let mut mismatches = 0;
    for summary in inputs.finished() {
        lines += summary.lines;
        mismatches += summary.mismatches;
        writeln!(
            out,
            "  {}: {} records, {} mismatches, {} lines",
            summary.name, summary.records, summary.mismatches, summary.lines
        )
        .map_err(CliError::stdout)?;
    }
    writeln!(out, "{}", "Totals:".bold()).map_err(CliError::stdout)?;
    writeln!(out, "  Records:    {}", inputs.total_records()).map_err(CliError::stdout)?;
    writeln!(out, "  Lines:      {}", lines).map_err(CliError::stdout)?;
    writeln!(out, "  Schemas:    {}", inputs.header_cache().len()).map_err(CliError::stdout)?;
    writeln!(out, "  Mismatches: {}", mismatches).map_err(CliError::stdout)?;
    out.flush().map_err(CliError::stdout)
}
