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

//! CLI command definitions and argument parsing.
//!
//! Every command reads the same kind of input, so the reader options live in
//! [`InputArgs`] and are flattened into each command.

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand, ValueEnum};
use lrec_stream::StreamingReaderConfig;
use std::path::PathBuf;

/// Environment variable overriding the maximum line length.
pub const MAX_LINE_LENGTH_ENV: &str = "LREC_MAX_LINE_LENGTH";

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use lrec_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Print every record
    ///
    /// Reads the inputs in order and prints each record as key=value pairs,
    /// or as one JSON object per line.
    Cat {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Dkvp)]
        format: OutputFormat,

        /// Report data lines with the wrong field count and keep going
        #[arg(long)]
        skip_bad_lines: bool,
    },

    /// List the distinct headers
    ///
    /// Prints each distinct header in the order first seen, with the number
    /// of records read against it.
    Schemas {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show record and line counts
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Commands {
    /// Execute the command, writing results to stdout.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an input cannot be opened or read, a data line does
    /// not match its header, or output cannot be written.
    pub fn execute(self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut out = std::io::BufWriter::new(stdout.lock());
        match self {
            Commands::Cat {
                input,
                format,
                skip_bad_lines,
            } => commands::cat(&input, format, skip_bad_lines, &mut out),
            Commands::Schemas { input } => commands::schemas(&input, &mut out),
            Commands::Stats { input } => commands::stats(&input, &mut out),
        }
    }
}

/// Output format for `cat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// key=value pairs joined by the field separator
    Dkvp,
    /// One JSON object per line
    Json,
}

/// Input files and reader options.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input files, read in order (stdin when omitted, or for "-")
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Field separator: a single ASCII character or comma, tab, space, semicolon, pipe
    #[arg(long, value_name = "SEP", default_value = "comma", value_parser = parse_separator)]
    pub ifs: u8,

    /// Record separator: a single ASCII character or lf, cr, semicolon, pipe
    #[arg(long, value_name = "SEP", default_value = "lf", value_parser = parse_separator)]
    pub irs: u8,

    /// Treat runs of the field separator as one
    #[arg(long)]
    pub repifs: bool,
}

impl InputArgs {
    /// Build the reader configuration for these options.
    ///
    /// The line length limit comes from `LREC_MAX_LINE_LENGTH` when set to a
    /// positive integer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the separators are rejected by the reader.
    pub fn config(&self) -> Result<StreamingReaderConfig, CliError> {
        let mut config = StreamingReaderConfig {
            record_separator: self.irs,
            field_separator: self.ifs,
            allow_repeat_separator: self.repifs,
            ..Default::default()
        };
        if let Some(limit) = max_line_length_override() {
            config.max_line_length = limit;
        }
        config
            .validate()
            .map_err(|e| CliError::invalid_input(e.to_string()))?;
        Ok(config)
    }
}

fn max_line_length_override() -> Option<usize> {
    std::env::var(MAX_LINE_LENGTH_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&limit| limit > 0)
}

/// Parse a separator given by name or as a single ASCII character.
///
/// ```
/// use lrec_cli::cli::parse_separator;
///
/// assert_eq!(parse_separator("tab"), Ok(b'\t'));
/// assert_eq!(parse_separator(";"), Ok(b';'));
/// assert!(parse_separator("ab").is_err());
/// ```
pub fn parse_separator(value: &str) -> Result<u8, String> {
    let byte = match value {
        "comma" => b',',
        "tab" | "\\t" => b'\t',
        "space" => b' ',
        "semicolon" => b';',
        "pipe" => b'|',
        "colon" => b':',
        "lf" | "newline" | "\\n" => b'\n',
        "cr" | "\\r" => b'\r',
        other => match other.as_bytes() {
            [byte] if byte.is_ascii() => *byte,
            _ => {
                return Err(format!(
                    "'{}' is not a single ASCII character or a known separator name",
                    other
                ))
            }
        },
    };
    Ok(byte)
}
