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

#![no_main]

use libfuzzer_sys::fuzz_target;
use lrec_stream::{HeaderArena, StreamingReader, StreamingReaderConfig};
use std::io::Cursor;

/// Fuzz target for the streaming reader.
///
/// The first input byte picks the field separator and the repeat rule, the
/// rest is the stream itself. Raw bytes are passed through so invalid UTF-8
/// reaches the line reader.
///
/// # Running the Fuzzer
///
/// ```bash
/// cd crates/lrec-stream
/// cargo fuzz run fuzz_streaming_reader -- -max_len=100000
/// ```
///
/// # Expected Behavior
///
/// - No panics on any input
/// - Every record has exactly as many values as its header has fields
fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };

    let separators = [b',', b'\t', b' ', b';', b'|'];
    let config = StreamingReaderConfig {
        field_separator: separators[(selector & 0x7f) as usize % separators.len()],
        allow_repeat_separator: selector & 0x80 != 0,
        max_line_length: 4096,
        ..Default::default()
    };

    let arena = HeaderArena::new();
    let Ok(reader) = StreamingReader::from_reader_with_config(Cursor::new(body), &arena, config)
    else {
        return;
    };

    for record in reader.flatten() {
        assert_eq!(record.len(), record.header().len());
        assert!(!record.header().is_empty());
    }
});
