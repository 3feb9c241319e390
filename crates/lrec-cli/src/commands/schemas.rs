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

//! Schemas command - list distinct headers

use super::Inputs;
use crate::cli::InputArgs;
use crate::error::CliError;
use lrec_stream::HeaderArena;
use std::io::Write;

/// List every distinct header in first-seen order with its record count.
///
/// Output is one line per header: the ordinal, the record count and the
/// header line as it first appeared.
///
/// # Errors
///
/// Returns `Err` if an input cannot be read or a data line does not match
/// its header.
pub fn schemas<W: Write>(input: &InputArgs, out: &mut W) -> Result<(), CliError> {
    let config = input.config()?;
    let arena = HeaderArena::new();
    let mut inputs = Inputs::open(&input.files, config, &arena)?;

    // Indexed by header ordinal
    let mut counts: Vec<usize> = Vec::new();
    while let Some(result) = inputs.next_record()? {
        let ordinal = result?.header().ordinal();
        if counts.len() <= ordinal {
            counts.resize(ordinal + 1, 0);
        }
        counts[ordinal] += 1;
    }

    for header in inputs.header_cache().iter() {
        let count = counts.get(header.ordinal()).copied().unwrap_or(0);
        writeln!(out, "{}\t{}\t{}", header.ordinal() + 1, count, header.line())
            .map_err(CliError::stdout)?;
    }
    out.flush().map_err(CliError::stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_schemas_counts_records_per_header() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a,b\n1,2\n3,4\n\nc\n5\n\na,b\n6,7\n\nd\n")
            .unwrap();
        let args = InputArgs {
            files: vec![file.path().to_path_buf()],
            ifs: b',',
            irs: b'\n',
            repifs: false,
        };

        let mut out = Vec::new();
        schemas(&args, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\t3\ta,b\n2\t1\tc\n3\t0\td\n"
        );
    }
}
