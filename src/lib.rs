//! Performance log container decoding toolkit.
//!
//! The `perflog-utils` crate (library name `pfl`) provides Rust types
//! and functions for decoding gzip-compressed binary performance-log
//! containers into per-table CSV files plus a JSON row-count summary.
//!
//! A container holds a version record followed by zero or more table
//! blocks. Each table block is self-describing: a table name, a column
//! schema, then rows gated by a one-byte continuation flag, every cell
//! preceded by a one-byte type tag.
//!
//! # CLI Reference
//!
//! Install the `perfconv` binary and use its subcommands to work with log
//! containers from the command line.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`perfconv convert`](cli::app::Commands::Convert) | Decode a container into per-table CSV files and a JSON summary |
//! | [`perfconv inspect`](cli::app::Commands::Inspect) | List version, tables, and row counts without writing files |
//!
//! All subcommands accept `--color <auto|always|never>` and `--output <file>`.
//!
//! # Library API
//!
//! Add `pfl` as a dependency to use the decoding library directly:
//!
//! ```toml
//! [dependencies]
//! pfl = { package = "perflog-utils", version = "1" }
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use std::path::Path;
//! use pfl::perflog::container;
//! use pfl::perflog::csv::CsvSink;
//! use pfl::perflog::stream::PerfStream;
//! use pfl::perflog::summary;
//!
//! let mut stream = PerfStream::open("perf.log.gz").unwrap();
//! let mut sink = CsvSink::new(Path::new("out"));
//! let (version, summaries) = container::convert(&mut stream, &mut sink).unwrap();
//! println!("container version {}", version);
//! summary::write_summary(Path::new("out"), &summaries).unwrap();
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`perflog::stream`] | Gzip decompression and primitive wire reads |
//! | [`perflog::value`] | Type tags and the tagged scalar [`Value`](perflog::value::Value) |
//! | [`perflog::container`] | Version record, table blocks, the decode loop |
//! | [`perflog::csv`] | CSV escaping and the per-table file sink |
//! | [`perflog::summary`] | JSON row-count summary file |

#[cfg(feature = "cli")]
pub mod cli;
pub mod perflog;
pub mod util;

use thiserror::Error;

/// Errors returned by `perflog` operations.
#[derive(Error, Debug)]
pub enum PerfError {
    /// An I/O error occurred on the output side (directory or file
    /// creation, write, or flush failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// The compressed framing of the input is invalid, or a decoded value
    /// violates the wire format (bad UTF-8, negative length).
    #[error("Corrupt stream: {0}")]
    StreamCorrupt(String),

    /// The input ended with fewer bytes than a read declared, outside the
    /// one position where end-of-input means normal termination.
    #[error("Truncated stream: {0}")]
    TruncatedStream(String),

    /// An invalid argument was supplied on the command line.
    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl PerfError {
    /// Attach the name of the table being decoded to a decode error.
    pub(crate) fn in_table(self, table: &str) -> PerfError {
        match self {
            PerfError::TruncatedStream(msg) => {
                PerfError::TruncatedStream(format!("{msg} while decoding table `{table}`"))
            }
            PerfError::StreamCorrupt(msg) => {
                PerfError::StreamCorrupt(format!("{msg} while decoding table `{table}`"))
            }
            other => other,
        }
    }
}
