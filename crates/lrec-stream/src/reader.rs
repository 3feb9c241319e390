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

//! Line sources for the streaming reader.
//!
//! The reader pulls input one line at a time through the [`LineSource`]
//! trait. [`LineReader`] implements it over any [`Read`], splitting on a
//! configurable record separator byte; [`IterLineSource`] adapts an iterator
//! of already-split lines.

use crate::error::{StreamError, StreamResult};
use std::io::{BufRead, BufReader, Read};

/// Default buffer capacity for [`LineReader`].
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default maximum line length for [`LineReader`].
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1_000_000;

/// Supplier of input lines.
///
/// `next_line` returns the next line without its record separator, or
/// `Ok(None)` at end of stream. The caller owns the returned line.
pub trait LineSource {
    /// Read the next line.
    fn next_line(&mut self) -> StreamResult<Option<String>>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> StreamResult<Option<String>> {
        (**self).next_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> StreamResult<Option<String>> {
        (**self).next_line()
    }
}

/// Buffered line reader with line number tracking.
///
/// Lines are terminated by the record separator (default `\n`). When the
/// separator is `\n`, a `\r` before it is stripped as well, so CRLF input
/// reads the same as LF input. A final line without a separator is still
/// returned.
///
/// # Examples
///
/// ## Basic Line Reading
///
/// ```rust
/// use lrec_stream::{LineReader, LineSource};
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("a,b\r\n1,2\n"));
///
/// assert_eq!(reader.next_line().unwrap(), Some("a,b".to_string()));
/// assert_eq!(reader.next_line().unwrap(), Some("1,2".to_string()));
/// assert_eq!(reader.next_line().unwrap(), None);
/// assert_eq!(reader.line_number(), 2);
/// ```
///
/// ## Custom Record Separator
///
/// ```rust
/// use lrec_stream::{LineReader, LineSource};
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("x;1;;y")).record_separator(b';');
///
/// assert_eq!(reader.next_line().unwrap(), Some("x".to_string()));
/// assert_eq!(reader.next_line().unwrap(), Some("1".to_string()));
/// assert_eq!(reader.next_line().unwrap(), Some("".to_string()));
/// assert_eq!(reader.next_line().unwrap(), Some("y".to_string()));
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    record_separator: u8,
    max_line_length: usize,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            record_separator: b'\n',
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Set the byte that terminates lines.
    pub fn record_separator(mut self, separator: u8) -> Self {
        self.record_separator = separator;
        self
    }

    /// Set the maximum accepted line length in bytes, separator excluded.
    pub fn max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = limit;
        self
    }

    /// Get the current line number.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> StreamResult<Option<String>> {
        self.buffer.clear();

        match self.reader.read_until(self.record_separator, &mut self.buffer) {
            Ok(0) => Ok(None), // EOF
            Ok(_) => {
                self.line_number += 1;

                if self.buffer.last() == Some(&self.record_separator) {
                    self.buffer.pop();
                    if self.record_separator == b'\n' && self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }

                if self.buffer.len() > self.max_line_length {
                    return Err(StreamError::LineTooLong {
                        line: self.line_number,
                        length: self.buffer.len(),
                        limit: self.max_line_length,
                    });
                }

                let bytes = std::mem::take(&mut self.buffer);
                String::from_utf8(bytes).map(Some).map_err(|e| StreamError::Utf8 {
                    line: self.line_number,
                    message: e.utf8_error().to_string(),
                })
            }
            Err(e) => Err(StreamError::Io(e)),
        }
    }
}

impl<R: Read> LineSource for LineReader<R> {
    #[inline]
    fn next_line(&mut self) -> StreamResult<Option<String>> {
        LineReader::next_line(self)
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = StreamResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Line source over an iterator of lines.
///
/// ```rust
/// use lrec_stream::{IterLineSource, LineSource};
///
/// let mut source = IterLineSource::new(vec!["a", "1"]);
/// assert_eq!(source.next_line().unwrap(), Some("a".to_string()));
/// ```
pub struct IterLineSource<I> {
    lines: I,
}

impl<I> IterLineSource<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    /// Wrap anything that iterates over lines.
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl<I> LineSource for IterLineSource<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    fn next_line(&mut self) -> StreamResult<Option<String>> {
        Ok(self.lines.next().map(Into::into))
    }
}
