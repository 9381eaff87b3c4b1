//! CLI implementation for the `perfconv inspect` subcommand.
//!
//! Dry run: decodes the whole container with a counting sink, writing
//! nothing to disk, and reports the version record plus one line per
//! table (name, column count, rows). `--json` emits the same report as a
//! JSON document.

use std::io::Write;

use serde::Serialize;

use crate::cli::wprintln;
use crate::perflog::container::{self, RowSink, TableBlock, Version};
use crate::perflog::stream::PerfStream;
use crate::perflog::value::Value;
use crate::PerfError;

/// Options for the `perfconv inspect` subcommand.
pub struct InspectOptions {
    /// Path to the gzip-compressed log container.
    pub input: String,
    /// Output in JSON format.
    pub json: bool,
}

#[derive(Serialize)]
struct TableReport {
    #[serde(rename = "tableName")]
    table_name: String,
    columns: usize,
    rows: u64,
}

#[derive(Serialize)]
struct InspectReport {
    version: Version,
    tables: Vec<TableReport>,
}

/// Sink that counts rows per table without writing anything.
#[derive(Default)]
struct CountingSink {
    tables: Vec<TableReport>,
}

impl RowSink for CountingSink {
    fn begin_table(&mut self, table: &TableBlock) -> Result<(), PerfError> {
        self.tables.push(TableReport {
            table_name: table.name.clone(),
            columns: table.columns.len(),
            rows: 0,
        });
        Ok(())
    }

    fn row(&mut self, _values: &[Value]) -> Result<(), PerfError> {
        Ok(())
    }

    fn end_table(&mut self, _table: &TableBlock, rows: u64) -> Result<(), PerfError> {
        if let Some(last) = self.tables.last_mut() {
            last.rows = rows;
        }
        Ok(())
    }
}

/// Inspect a container without writing CSV files.
pub fn execute(opts: &InspectOptions, writer: &mut dyn Write) -> Result<(), PerfError> {
    let mut stream = PerfStream::open(&opts.input)?;
    let mut sink = CountingSink::default();
    let (version, _) = container::convert(&mut stream, &mut sink)?;

    let report = InspectReport {
        version,
        tables: sink.tables,
    };

    if opts.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| PerfError::Io(format!("Cannot serialize report: {e}")))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "Container version: {}", report.version)?;
    wprintln!(writer, "{:<32} {:>8} {:>10}", "TABLE", "COLUMNS", "ROWS")?;
    for t in &report.tables {
        wprintln!(
            writer,
            "{:<32} {:>8} {:>10}",
            t.table_name,
            t.columns,
            t.rows
        )?;
    }
    wprintln!(writer, "{} tables", report.tables.len())?;

    Ok(())
}
