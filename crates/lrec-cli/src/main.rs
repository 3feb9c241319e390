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

//! LREC Command Line Interface

use clap::Parser;
use lrec_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// LREC - heterogeneous CSV record reader
///
/// Reads CSV made of header blocks separated by blank lines, where each
/// block may have its own header.
///
/// # Examples
///
/// ```bash
/// # Print records as key=value pairs
/// lrec cat data.csv
///
/// # Tab-separated input as JSON lines
/// lrec cat --ifs tab --format json data.tsv
///
/// # Distinct headers across several files
/// lrec schemas a.csv b.csv
/// ```
#[derive(Parser)]
#[command(name = "lrec")]
#[command(author, version, about = "LREC - heterogeneous CSV record reader", long_about = None)]
struct Cli {
    /// Log reader activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let mut filter = EnvFilter::from_default_env();
    for target in ["lrec_cli", "lrec_stream", "lrec_core"] {
        filter = filter.add_directive(
            format!("{}={}", target, level)
                .parse()
                .expect("valid log directive"),
        );
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
