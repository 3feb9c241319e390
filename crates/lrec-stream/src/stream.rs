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

//! Streaming record reader.

use crate::error::{StreamError, StreamResult};
use crate::reader::{LineReader, LineSource};
use lrec_core::{
    parse_data_line, split_fields, CoreError, HeaderArena, HeaderCache, HeaderKeeper, Record,
};
use std::fmt;
use std::io::Read;
use tracing::{debug, trace};

/// Name reported for a source that was never given one.
pub const DEFAULT_SOURCE_NAME: &str = "(stdin)";

/// Configuration for [`StreamingReader`].
///
/// # Examples
///
/// ```rust
/// use lrec_stream::StreamingReaderConfig;
///
/// let config = StreamingReaderConfig {
///     field_separator: b'\t',
///     allow_repeat_separator: true,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let bad = StreamingReaderConfig { field_separator: b'\n', ..Default::default() };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingReaderConfig {
    /// Byte terminating each line.
    ///
    /// Default: `b'\n'` (a preceding `\r` is stripped too)
    pub record_separator: u8,

    /// Byte separating fields within a line.
    ///
    /// Default: `b','`
    pub field_separator: u8,

    /// Treat runs of consecutive field separators as one.
    ///
    /// Applies to header and data lines alike. Useful for space-aligned
    /// input.
    ///
    /// Default: false
    pub allow_repeat_separator: bool,

    /// Maximum line length in bytes.
    ///
    /// Default: 1,000,000 bytes (1MB)
    pub max_line_length: usize,

    /// Buffer size for reading input.
    ///
    /// Default: 64KB
    pub buffer_size: usize,
}

impl Default for StreamingReaderConfig {
    fn default() -> Self {
        Self {
            record_separator: b'\n',
            field_separator: b',',
            allow_repeat_separator: false,
            max_line_length: 1_000_000,
            buffer_size: 64 * 1024,
        }
    }
}

impl StreamingReaderConfig {
    /// Check that the settings can be used to read input.
    pub fn validate(&self) -> StreamResult<()> {
        if !self.record_separator.is_ascii() {
            return Err(StreamError::config(format!(
                "record separator 0x{:02x} is not ASCII",
                self.record_separator
            )));
        }
        if !self.field_separator.is_ascii() {
            return Err(StreamError::config(format!(
                "field separator 0x{:02x} is not ASCII",
                self.field_separator
            )));
        }
        if self.record_separator == self.field_separator {
            return Err(StreamError::config("record and field separators must differ"));
        }
        if self.max_line_length == 0 {
            return Err(StreamError::config("max_line_length must be at least 1"));
        }
        Ok(())
    }

    /// Build a [`LineReader`] over `reader` using these settings.
    pub fn line_reader<R: Read>(&self, reader: R) -> LineReader<R> {
        LineReader::with_capacity(reader, self.buffer_size.max(1))
            .record_separator(self.record_separator)
            .max_line_length(self.max_line_length)
    }
}

/// Where the reader currently is.
///
/// Line and record numbers are 1-based and restart with every source;
/// `total_records` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderContext {
    /// Name of the current source, used in error messages.
    pub source: String,
    /// Data lines consumed from the current source.
    pub record_number: usize,
    /// Lines consumed from the current source.
    pub line_number: usize,
    /// Data lines consumed across all sources.
    pub total_records: usize,
}

impl Default for ReaderContext {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_NAME.to_string(),
            record_number: 0,
            line_number: 0,
            total_records: 0,
        }
    }
}

#[derive(Clone, Copy)]
enum ReaderState<'a> {
    AwaitHeader,
    AwaitData(&'a HeaderKeeper<'a>),
}

/// Pull-based reader for heterogeneous CSV.
///
/// Each call to [`read`](Self::read) returns at most one record. The first
/// non-blank line of a block is taken as its header; following lines are
/// data until a blank line ends the block. Headers are cached by field list
/// in the [`HeaderCache`] backed by the arena passed at construction, so a
/// schema that reappears, in the same source or a later one, is shared by
/// all records parsed against it.
///
/// Records borrow their keys from the arena, not from the reader. They stay
/// valid after the reader is dropped, for as long as the arena lives.
///
/// # Examples
///
/// ```rust
/// use lrec_core::HeaderArena;
/// use lrec_stream::StreamingReader;
/// use std::io::Cursor;
///
/// let input = "a,b,c\n1,2,3\n4,5,6\n\nd,e,f,g\n3,4,5,6\n";
/// let arena = HeaderArena::new();
/// let reader = StreamingReader::from_reader(Cursor::new(input), &arena).unwrap();
///
/// let records: Vec<String> = reader.map(|r| r.unwrap().to_string()).collect();
/// assert_eq!(records, ["a=1,b=2,c=3", "a=4,b=5,c=6", "d=3,e=4,f=5,g=6"]);
/// ```
pub struct StreamingReader<'a, S: LineSource> {
    source: S,
    config: StreamingReaderConfig,
    cache: HeaderCache<'a>,
    state: ReaderState<'a>,
    context: ReaderContext,
    failed: bool,
}

impl<'a, R: Read> StreamingReader<'a, LineReader<R>> {
    /// Create a reader over a byte stream with default configuration.
    pub fn from_reader(reader: R, arena: &'a HeaderArena) -> StreamResult<Self> {
        Self::from_reader_with_config(reader, arena, StreamingReaderConfig::default())
    }

    /// Create a reader over a byte stream with custom configuration.
    pub fn from_reader_with_config(
        reader: R,
        arena: &'a HeaderArena,
        config: StreamingReaderConfig,
    ) -> StreamResult<Self> {
        config.validate()?;
        let source = config.line_reader(reader);
        Self::with_config(source, arena, config)
    }
}

impl<'a, S: LineSource> StreamingReader<'a, S> {
    /// Create a reader over a line source with default configuration.
    pub fn new(source: S, arena: &'a HeaderArena) -> Self {
        Self::build(source, arena, StreamingReaderConfig::default())
    }

    /// Create a reader over a line source with custom configuration.
    ///
    /// Only the field splitting settings apply; the source already decides
    /// where lines end.
    pub fn with_config(
        source: S,
        arena: &'a HeaderArena,
        config: StreamingReaderConfig,
    ) -> StreamResult<Self> {
        config.validate()?;
        Ok(Self::build(source, arena, config))
    }

    fn build(source: S, arena: &'a HeaderArena, config: StreamingReaderConfig) -> Self {
        Self {
            source,
            config,
            cache: HeaderCache::new(arena),
            state: ReaderState::AwaitHeader,
            context: ReaderContext::default(),
            failed: false,
        }
    }

    /// Set the name reported for the current source.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.context.source = name.into();
        self
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// - [`StreamError::HeaderDataMismatch`] when a data line has a different
    ///   field count than its header. The line is consumed, nothing else
    ///   changes, and the next call continues with the following line.
    /// - Any error from the line source.
    pub fn read(&mut self) -> StreamResult<Option<Record<'a>>> {
        loop {
            let header = match self.state {
                ReaderState::AwaitData(header) => header,
                ReaderState::AwaitHeader => {
                    let Some(line) = self.next_line()? else {
                        return Ok(None);
                    };
                    let fields = split_fields(
                        &line,
                        self.config.field_separator,
                        self.config.allow_repeat_separator,
                    );
                    if fields.is_empty() {
                        trace!(line = self.context.line_number, "Skipping blank line");
                        continue;
                    }
                    let header = self.cache.resolve(&line, &fields);
                    debug!(
                        source = %self.context.source,
                        line = self.context.line_number,
                        ordinal = header.ordinal(),
                        fields = header.len(),
                        "Header block started"
                    );
                    self.state = ReaderState::AwaitData(header);
                    header
                }
            };

            let Some(line) = self.next_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                trace!(line = self.context.line_number, "End of header block");
                self.state = ReaderState::AwaitHeader;
                continue;
            }

            self.context.record_number += 1;
            self.context.total_records += 1;
            return self.parse_against(header, line).map(Some);
        }
    }

    /// Parse `line` as data against the active header.
    ///
    /// Useful to re-feed a line that was corrected after a mismatch. The
    /// reader's counters and state are not changed.
    ///
    /// # Errors
    ///
    /// [`StreamError::NoActiveHeader`] between blocks, or
    /// [`StreamError::HeaderDataMismatch`] on a field count mismatch.
    pub fn parse_line(&self, line: String) -> StreamResult<Record<'a>> {
        match self.state {
            ReaderState::AwaitData(header) => self.parse_against(header, line),
            ReaderState::AwaitHeader => Err(StreamError::NoActiveHeader {
                input: self.context.source.clone(),
                line: self.context.line_number,
            }),
        }
    }

    /// Switch to a new source, returning the previous one.
    ///
    /// Per-source line and record numbers restart and the reader waits for a
    /// header again. The header cache is kept, so a schema seen in an
    /// earlier source resolves to the same header.
    pub fn begin_source(&mut self, source: S, name: impl Into<String>) -> S {
        let name = name.into();
        debug!(
            previous = %self.context.source,
            next = %name,
            records = self.context.record_number,
            "Switching source"
        );
        self.context.source = name;
        self.context.record_number = 0;
        self.context.line_number = 0;
        self.state = ReaderState::AwaitHeader;
        self.failed = false;
        std::mem::replace(&mut self.source, source)
    }

    /// Current position.
    #[inline]
    pub fn context(&self) -> &ReaderContext {
        &self.context
    }

    /// Header of the block being read, if inside one.
    pub fn active_header(&self) -> Option<&'a HeaderKeeper<'a>> {
        match self.state {
            ReaderState::AwaitData(header) => Some(header),
            ReaderState::AwaitHeader => None,
        }
    }

    /// Every header seen so far.
    #[inline]
    pub fn header_cache(&self) -> &HeaderCache<'a> {
        &self.cache
    }

    #[inline]
    pub fn config(&self) -> &StreamingReaderConfig {
        &self.config
    }

    /// Stop reading, keeping the header cache and the source.
    pub fn into_parts(self) -> (HeaderCache<'a>, S) {
        (self.cache, self.source)
    }

    fn next_line(&mut self) -> StreamResult<Option<String>> {
        match self.source.next_line() {
            Ok(line) => {
                if line.is_some() {
                    self.context.line_number += 1;
                }
                Ok(line)
            }
            Err(e) => {
                // The source consumed the bad line
                if let Some(line) = e.line() {
                    self.context.line_number = line;
                }
                Err(e)
            }
        }
    }

    fn parse_against(
        &self,
        header: &'a HeaderKeeper<'a>,
        line: String,
    ) -> StreamResult<Record<'a>> {
        parse_data_line(
            header,
            line,
            self.config.field_separator,
            self.config.allow_repeat_separator,
        )
        .map_err(|e| match e {
            CoreError::HeaderDataMismatch { expected, got } => StreamError::HeaderDataMismatch {
                input: self.context.source.clone(),
                line: self.context.line_number,
                expected,
                got,
            },
        })
    }
}

impl<'a, S: LineSource> Iterator for StreamingReader<'a, S> {
    type Item = StreamResult<Record<'a>>;

    /// Yields records until end of input. Recoverable errors are yielded
    /// and iteration continues; after any other error the iterator ends.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.read().transpose();
        if let Some(Err(e)) = &item {
            self.failed = !e.is_recoverable();
        }
        item
    }
}

impl<S: LineSource> fmt::Debug for StreamingReader<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingReader")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("active_header", &self.active_header())
            .field("cached_headers", &self.cache.len())
            .finish()
    }
}
