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

//! Property-based tests for the streaming reader.

use lrec_stream::{HeaderArena, StreamingReader};
use proptest::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;

/// A block: header fields plus data rows of the same width.
fn block() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (1usize..5).prop_flat_map(|width| {
        (
            prop::collection::vec("[a-d]{1,3}", width),
            prop::collection::vec(prop::collection::vec("[0-9]{1,4}", width), 0..6),
        )
    })
}

fn render(blocks: &[(Vec<String>, Vec<Vec<String>>)], blank_lines: usize) -> String {
    let mut input = String::new();
    for (header, rows) in blocks {
        input.push_str(&header.join(","));
        input.push('\n');
        for row in rows {
            input.push_str(&row.join(","));
            input.push('\n');
        }
        input.push_str(&"\n".repeat(blank_lines));
    }
    input
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: Every data row comes back as one record paired with its own header.
    #[test]
    fn prop_records_match_blocks(
        blocks in prop::collection::vec(block(), 0..8),
        blank_lines in 1usize..4
    ) {
        let input = render(&blocks, blank_lines);
        let arena = HeaderArena::new();
        let mut reader = StreamingReader::from_reader(Cursor::new(input), &arena).unwrap();

        let mut records = Vec::new();
        while let Some(record) = reader.read().unwrap() {
            records.push(record);
        }

        let expected: Vec<(Vec<String>, Vec<String>)> = blocks
            .iter()
            .flat_map(|(header, rows)| rows.iter().map(move |row| (header.clone(), row.clone())))
            .collect();
        prop_assert_eq!(records.len(), expected.len());
        for (record, (header, row)) in records.iter().zip(&expected) {
            let keys: Vec<&str> = record.keys().collect();
            let values: Vec<&str> = record.values().collect();
            prop_assert_eq!(keys, header.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(values, row.iter().map(String::as_str).collect::<Vec<_>>());
        }
        prop_assert_eq!(reader.context().total_records, expected.len());
    }

    /// Property: The cache holds exactly one header per distinct field list.
    #[test]
    fn prop_cache_size_is_distinct_schemas(blocks in prop::collection::vec(block(), 0..10)) {
        let input = render(&blocks, 1);
        let arena = HeaderArena::new();
        let mut reader = StreamingReader::from_reader(Cursor::new(input), &arena).unwrap();
        while reader.read().unwrap().is_some() {}

        let distinct: HashSet<&Vec<String>> = blocks.iter().map(|(header, _)| header).collect();
        prop_assert_eq!(reader.header_cache().len(), distinct.len());
    }

    /// Property: A row of the wrong width is reported and skipped without disturbing the block.
    #[test]
    fn prop_mismatch_does_not_disturb_block(
        width in 1usize..6,
        extra in 1usize..4,
        shorter in proptest::bool::ANY
    ) {
        let header: Vec<String> = (0..width).map(|i| format!("h{}", i)).collect();
        let good: Vec<String> = (0..width).map(|i| i.to_string()).collect();
        let bad_width = if shorter { width.saturating_sub(extra).max(1) } else { width + extra };
        prop_assume!(bad_width != width);
        let bad: Vec<String> = (0..bad_width).map(|i| i.to_string()).collect();

        let input = format!("{}\n{}\n{}\n", header.join(","), bad.join(","), good.join(","));
        let arena = HeaderArena::new();
        let mut reader = StreamingReader::from_reader(Cursor::new(input), &arena).unwrap();

        let err = reader.read().unwrap_err();
        prop_assert_eq!(err.line(), Some(2));
        let record = reader.read().unwrap().unwrap();
        prop_assert_eq!(record.len(), width);
        prop_assert_eq!(reader.header_cache().len(), 1);
    }
}
