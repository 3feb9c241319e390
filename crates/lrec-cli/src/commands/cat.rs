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

//! Cat command - print records

use super::Inputs;
use crate::cli::{InputArgs, OutputFormat};
use crate::error::CliError;
use lrec_stream::{HeaderArena, Record};
use std::io::Write;
use tracing::warn;

/// Print every record of the inputs to `out`.
///
/// # Errors
///
/// Returns `Err` on the first data line that does not match its header,
/// unless `skip_bad_lines` is set, in which case the line is logged as a
/// warning and skipped.
pub fn cat<W: Write>(
    input: &InputArgs,
    format: OutputFormat,
    skip_bad_lines: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let config = input.config()?;
    let separator = char::from(config.field_separator);
    let arena = HeaderArena::new();
    let mut inputs = Inputs::open(&input.files, config, &arena)?;
    let mut skipped = 0usize;

    while let Some(result) = inputs.next_record()? {
        let record = match result {
            Ok(record) => record,
            Err(e) if skip_bad_lines => {
                warn!(error = %e, "Skipping data line");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match format {
            OutputFormat::Dkvp => write_dkvp(&record, separator, out)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out).map_err(CliError::stdout)?;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped data lines with mismatched field counts");
    }
    out.flush().map_err(CliError::stdout)
}

fn write_dkvp<W: Write>(
    record: &Record<'_>,
    separator: char,
    out: &mut W,
) -> Result<(), CliError> {
    for (i, (key, value)) in record.iter().enumerate() {
        if i > 0 {
            write!(out, "{}", separator).map_err(CliError::stdout)?;
        }
        write!(out, "{}={}", key, value).map_err(CliError::stdout)?;
    }
    writeln!(out).map_err(CliError::stdout)
}
