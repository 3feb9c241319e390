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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

// Test helper to create an LREC command
fn lrec_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lrec").expect("Failed to find lrec binary");
    cmd.env_remove("RUST_LOG").env_remove("LREC_MAX_LINE_LENGTH");
    cmd
}

// Test helper to create a temporary file with content
fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

const HETEROGENEOUS: &str = "a,b,c\n1,2,3\n4,5,6\n\nd,e,f,g\n3,4,5,6\n";

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    lrec_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LREC - heterogeneous CSV record reader"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    lrec_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lrec"));
}

#[test]
fn test_no_subcommand_fails() {
    lrec_cmd().assert().failure();
}

// ===== Cat Command Tests =====

#[test]
fn test_cat_file() {
    let file = create_temp_file(HETEROGENEOUS, ".csv");

    lrec_cmd()
        .arg("cat")
        .arg(file.path())
        .assert()
        .success()
        .stdout("a=1,b=2,c=3\na=4,b=5,c=6\nd=3,e=4,f=5,g=6\n");
}

#[test]
fn test_cat_stdin() {
    lrec_cmd()
        .arg("cat")
        .write_stdin("x,y\r\n1,2\r\n")
        .assert()
        .success()
        .stdout("x=1,y=2\n");
}

#[test]
fn test_cat_json() {
    let file = create_temp_file(HETEROGENEOUS, ".csv");

    lrec_cmd()
        .args(["cat", "--format", "json"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"a":"1","b":"2","c":"3"}"#))
        .stdout(predicate::str::contains(r#"{"d":"3","e":"4","f":"5","g":"6"}"#));
}

#[test]
fn test_cat_multiple_files() {
    let first = create_temp_file("id,name\n1,ann\n", ".csv");
    let second = create_temp_file("id,name\n2,bo\n", ".csv");

    lrec_cmd()
        .arg("cat")
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("id=1,name=ann\nid=2,name=bo\n");
}

#[test]
fn test_cat_tab_separated() {
    let file = create_temp_file("k\tv\nx\ty\n", ".tsv");

    lrec_cmd()
        .args(["cat", "--ifs", "tab"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("k=x\tv=y\n");
}

#[test]
fn test_cat_repifs() {
    let file = create_temp_file("name   size\nfoo    10\n", ".txt");

    lrec_cmd()
        .args(["cat", "--ifs", "space", "--repifs"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("name=foo size=10\n");
}

#[test]
fn test_cat_custom_record_separator() {
    let file = create_temp_file("a,b;1,2;;c;3", ".txt");

    lrec_cmd()
        .args(["cat", "--irs", "semicolon"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("a=1,b=2\nc=3\n");
}

#[test]
fn test_cat_mismatch_fails() {
    let file = create_temp_file("a,b\n1,2\n1,2,3\n", ".csv");

    lrec_cmd()
        .arg("cat")
        .arg(file.path())
        .assert()
        .failure()
        .stdout("a=1,b=2\n")
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Header-data length mismatch"))
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_cat_skip_bad_lines() {
    let file = create_temp_file("a,b\n1,2\n1,2,3\n4,5\n", ".csv");

    lrec_cmd()
        .args(["cat", "--skip-bad-lines"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("a=1,b=2\na=4,b=5\n")
        .stderr(predicate::str::contains("Skipping data line"));
}

#[test]
fn test_cat_missing_file() {
    lrec_cmd()
        .args(["cat", "/nonexistent/input.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("/nonexistent/input.csv"));
}

#[test]
fn test_cat_invalid_separator() {
    lrec_cmd()
        .args(["cat", "--ifs", "double"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a single ASCII character"));
}

#[test]
fn test_cat_equal_separators_rejected() {
    lrec_cmd()
        .args(["cat", "--ifs", "lf"])
        .write_stdin("a\n1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ"));
}

#[test]
fn test_max_line_length_env() {
    let file = create_temp_file("a,b\n1234567890,1\n", ".csv");

    lrec_cmd()
        .env("LREC_MAX_LINE_LENGTH", "8")
        .arg("cat")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too long"));
}

// ===== Schemas Command Tests =====

#[test]
fn test_schemas() {
    let first = create_temp_file("a,b\n1,2\n\nc\n3\n", ".csv");
    let second = create_temp_file("a,b\n4,5\n6,7\n", ".csv");

    lrec_cmd()
        .arg("schemas")
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("1\t3\ta,b\n2\t1\tc\n");
}

// ===== Stats Command Tests =====

#[test]
fn test_stats() {
    let file = create_temp_file(HETEROGENEOUS, ".csv");

    lrec_cmd()
        .arg("stats")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records, 0 mismatches, 6 lines"))
        .stdout(predicate::str::contains("Schemas:    2"))
        .stdout(predicate::str::contains("Mismatches: 0"));
}

#[test]
fn test_stats_agrees_with_schemas() {
    let file = create_temp_file("a,b\n1,2\n1,2,3\n3,4\n", ".csv");

    lrec_cmd()
        .arg("stats")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records, 1 mismatches, 4 lines"))
        .stdout(predicate::str::contains("Records:    2"))
        .stdout(predicate::str::contains("Mismatches: 1"));
}

#[test]
fn test_stats_stdin_name() {
    lrec_cmd()
        .arg("stats")
        .write_stdin("a\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(stdin): 1 records, 0 mismatches, 2 lines"));
}

#[test]
fn test_verbose_logs_schema_changes() {
    let file = create_temp_file(HETEROGENEOUS, ".csv");

    lrec_cmd()
        .args(["-v", "cat"])
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Header block started"));
}
