//! Version record, table blocks, and the container decode loop.
//!
//! A container is a version record followed by zero or more table blocks.
//! [`convert`] drives the single sequential pass: it owns the decode
//! cursor, reads each table's name and column schema, then decodes rows
//! gated by a one-byte continuation flag, handing each rendered row to a
//! [`RowSink`]. Decoding is strictly in wire order; the column count must
//! be read before any row can be decoded.
//!
//! There are exactly two normal stop conditions, both at the table-name
//! marker: clean end-of-input, or the null/empty-name sentinel. Any other
//! decode failure aborts the whole run; there is no mid-stream
//! resynchronization and no per-table recovery.

use std::fmt;
use std::io::Read;

use serde::Serialize;

use crate::perflog::stream::PerfStream;
use crate::perflog::value::{read_value, Value};
use crate::PerfError;

/// Container version record, read once at stream start.
///
/// Informational only; no minimum version is enforced.
#[derive(Debug, Clone, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub patch: u32,
    pub qualifier: String,
}

impl Version {
    /// Read the version record: four u32 components plus a qualifier string.
    pub fn read<R: Read>(stream: &mut PerfStream<R>) -> Result<Self, PerfError> {
        let major = stream.read_u32()?;
        let minor = stream.read_u32()?;
        let micro = stream.read_u32()?;
        let patch = stream.read_u32()?;
        let qualifier = stream.read_string()?.unwrap_or_default();
        Ok(Version {
            major,
            minor,
            micro,
            patch,
            qualifier,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.micro, self.patch
        )?;
        if !self.qualifier.is_empty() {
            write!(f, " {}", self.qualifier)?;
        }
        Ok(())
    }
}

/// A table block's identity and column schema. Column order defines row
/// field order.
#[derive(Debug, Clone)]
pub struct TableBlock {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableBlock {
    /// Read the next table's name and schema.
    ///
    /// Returns `Ok(None)` on either normal stop condition (clean EOF at
    /// the name marker, or a null/empty table name). Any other failure is
    /// fatal for the run.
    pub fn read<R: Read>(stream: &mut PerfStream<R>) -> Result<Option<Self>, PerfError> {
        let name = match stream.read_string_or_end()? {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(None),
        };

        let n_columns = stream.read_i32().map_err(|e| e.in_table(&name))?;
        if n_columns < 0 {
            return Err(PerfError::StreamCorrupt(format!(
                "negative column count {} in table `{}`",
                n_columns, name
            )));
        }

        let mut columns = Vec::with_capacity(n_columns as usize);
        for _ in 0..n_columns {
            let column = stream
                .read_string()
                .map_err(|e| e.in_table(&name))?
                .unwrap_or_default();
            columns.push(column);
        }

        Ok(Some(TableBlock { name, columns }))
    }
}

/// One completed table's row count, in table-processing order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableSummary {
    #[serde(rename = "tableName")]
    pub table_name: String,
    pub rows: u64,
}

/// Receiver for decoded tables and rows.
///
/// The seam between the decode loop and its outputs: the CLI installs the
/// CSV-writing sink, `perfconv inspect` a counting sink, unit tests an
/// in-memory one. Rows are handed over transiently; a sink must not
/// expect them to be retained.
pub trait RowSink {
    /// A table's schema has been read; rows for it follow.
    fn begin_table(&mut self, table: &TableBlock) -> Result<(), PerfError>;

    /// One decoded row, positionally aligned to the table's columns.
    fn row(&mut self, values: &[Value]) -> Result<(), PerfError>;

    /// The table's row loop terminated after `rows` rows.
    fn end_table(&mut self, table: &TableBlock, rows: u64) -> Result<(), PerfError>;
}

/// Decode an entire container, handing every table and row to `sink`.
///
/// Returns the version record and one [`TableSummary`] per table in
/// processing order. Duplicate table names are not deduplicated; sinks
/// see them as separate tables (for the CSV sink, last write wins).
pub fn convert<R: Read, S: RowSink>(
    stream: &mut PerfStream<R>,
    sink: &mut S,
) -> Result<(Version, Vec<TableSummary>), PerfError> {
    let version = Version::read(stream)?;
    let mut summaries = Vec::new();

    while let Some(table) = TableBlock::read(stream)? {
        sink.begin_table(&table)?;

        let mut rows = 0u64;
        let mut values: Vec<Value> = Vec::with_capacity(table.columns.len());
        while stream.read_bool().map_err(|e| e.in_table(&table.name))? {
            values.clear();
            for _ in 0..table.columns.len() {
                let tag = stream.read_u8().map_err(|e| e.in_table(&table.name))?;
                let value = read_value(stream, tag).map_err(|e| e.in_table(&table.name))?;
                values.push(value);
            }
            sink.row(&values)?;
            rows += 1;
        }

        sink.end_table(&table, rows)?;
        summaries.push(TableSummary {
            table_name: table.name,
            rows,
        });
    }

    Ok((version, summaries))
}
