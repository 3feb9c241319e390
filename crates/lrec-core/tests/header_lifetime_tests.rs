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

//! Integration tests for header retention across schema changes.

use lrec_core::{parse_data_line, split_fields, HeaderArena, HeaderCache, Record};

/// Drive a block-structured input through the cache by hand and keep every record.
fn collect_records<'a>(cache: &mut HeaderCache<'a>, input: &str) -> Vec<Record<'a>> {
    let mut records = Vec::new();
    let mut header = None;

    for line in input.lines() {
        if line.is_empty() {
            header = None;
            continue;
        }
        match header {
            None => {
                let fields = split_fields(line, b',', false);
                header = Some(cache.resolve(line, &fields));
            }
            Some(active) => {
                records.push(parse_data_line(active, line.to_string(), b',', false).unwrap());
            }
        }
    }

    records
}

#[test]
fn test_records_survive_schema_switch() {
    let arena = HeaderArena::new();
    let mut cache = HeaderCache::new(&arena);

    let records = collect_records(&mut cache, "a,b,c\n1,2,3\n4,5,6\n\nd,e,f,g\n3,4,5,6\n");
    drop(cache);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].to_string(), "a=1,b=2,c=3");
    assert_eq!(records[1].to_string(), "a=4,b=5,c=6");
    assert_eq!(records[2].to_string(), "d=3,e=4,f=5,g=6");
}

#[test]
fn test_repeated_schema_shares_keeper() {
    let arena = HeaderArena::new();
    let mut cache = HeaderCache::new(&arena);

    let records = collect_records(&mut cache, "a,b\n1,2\n\nx\n9\n\na,b\n3,4\n");
    assert_eq!(cache.len(), 2);
    assert!(std::ptr::eq(records[0].header(), records[2].header()));
    assert!(!std::ptr::eq(records[0].header(), records[1].header()));
}

#[test]
fn test_cache_iteration_matches_first_sighting() {
    let arena = HeaderArena::new();
    let mut cache = HeaderCache::new(&arena);

    collect_records(&mut cache, "x,y\n1,2\n\nb\n1\n\nx,y\n5,6\n\na\n0\n");
    let lines: Vec<&str> = cache.iter().map(|keeper| keeper.line()).collect();
    assert_eq!(lines, vec!["x,y", "b", "a"]);
}

#[test]
fn test_many_schemas() {
    let arena = HeaderArena::new();
    let mut cache = HeaderCache::new(&arena);

    let mut input = String::new();
    for i in 0..200 {
        input.push_str(&format!("id,col{}\n{},v\n\n", i % 50, i));
    }

    let records = collect_records(&mut cache, &input);
    assert_eq!(records.len(), 200);
    assert_eq!(cache.len(), 50);
    assert_eq!(records[199].get("col49"), Some("v"));
    assert!(std::ptr::eq(records[0].header(), records[50].header()));
}
