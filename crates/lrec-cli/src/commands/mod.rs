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

//! CLI command implementations

mod cat;
mod schemas;
mod stats;

pub use cat::cat;
pub use schemas::schemas;
pub use stats::stats;

use crate::error::CliError;
use lrec_stream::{
    HeaderArena, HeaderCache, LineReader, Record, StreamResult, StreamingReader,
    StreamingReaderConfig,
};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name used for standard input in messages.
pub const STDIN_NAME: &str = "(stdin)";

type Source = LineReader<Box<dyn Read>>;

/// Counts for one finished input.
///
/// `records` only counts data lines that matched their header; the others
/// are in `mismatches`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    pub records: usize,
    pub mismatches: usize,
    pub lines: usize,
}

/// Records from a list of inputs, read through one reader.
///
/// Inputs are opened lazily, one after the other. The header cache is shared
/// by all of them.
pub struct Inputs<'a> {
    reader: StreamingReader<'a, Source>,
    pending: VecDeque<PathBuf>,
    config: StreamingReaderConfig,
    finished: Vec<SourceSummary>,
    mismatches: usize,
    done: bool,
}

impl<'a> Inputs<'a> {
    /// Open the first input. An empty list means standard input.
    pub fn open(
        files: &[PathBuf],
        config: StreamingReaderConfig,
        arena: &'a HeaderArena,
    ) -> Result<Self, CliError> {
        let mut pending: VecDeque<PathBuf> = files.iter().cloned().collect();
        let first = pending.pop_front().unwrap_or_else(|| PathBuf::from("-"));
        let (source, name) = open_source(&first, &config)?;
        let reader = StreamingReader::with_config(source, arena, config.clone())?.named(name);
        Ok(Self {
            reader,
            pending,
            config,
            finished: Vec::new(),
            mismatches: 0,
            done: false,
        })
    }

    /// Next record, moving on to the next input at the end of each one.
    ///
    /// Returns `Ok(Some(Err(_)))` for a data line that does not match its
    /// header; the caller decides whether to continue. Other read errors end
    /// the walk with `Err`.
    pub fn next_record(&mut self) -> Result<Option<StreamResult<Record<'a>>>, CliError> {
        if self.done {
            return Ok(None);
        }
        loop {
            match self.reader.read() {
                Ok(Some(record)) => return Ok(Some(Ok(record))),
                Err(e) if e.is_recoverable() => {
                    self.mismatches += 1;
                    return Ok(Some(Err(e)));
                }
                Err(e) => return Err(e.into()),
                Ok(None) => {
                    self.finish_source();
                    let Some(path) = self.pending.pop_front() else {
                        self.done = true;
                        return Ok(None);
                    };
                    let (source, name) = open_source(&path, &self.config)?;
                    self.reader.begin_source(source, name);
                }
            }
        }
    }

    fn finish_source(&mut self) {
        let context = self.reader.context();
        let mismatches = std::mem::take(&mut self.mismatches);
        debug!(
            source = %context.source,
            data_lines = context.record_number,
            mismatches,
            lines = context.line_number,
            "Finished input"
        );
        self.finished.push(SourceSummary {
            name: context.source.clone(),
            records: context.record_number - mismatches,
            mismatches,
            lines: context.line_number,
        });
    }

    /// Inputs read to the end so far, in order.
    pub fn finished(&self) -> &[SourceSummary] {
        &self.finished
    }

    pub fn header_cache(&self) -> &HeaderCache<'a> {
        self.reader.header_cache()
    }

    /// Records parsed so far across all inputs, mismatches excluded.
    pub fn total_records(&self) -> usize {
        let mismatches: usize = self.finished.iter().map(|s| s.mismatches).sum();
        self.reader.context().total_records - mismatches - self.mismatches
    }
}

fn open_source(
    path: &Path,
    config: &StreamingReaderConfig,
) -> Result<(Source, String), CliError> {
    if path.as_os_str() == "-" {
        let stdin: Box<dyn Read> = Box::new(io::stdin());
        return Ok((config.line_reader(stdin), STDIN_NAME.to_string()));
    }
    let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
    debug!(path = %path.display(), "Opened input");
    let file: Box<dyn Read> = Box::new(file);
    Ok((config.line_reader(file), path.display().to_string()))
}
