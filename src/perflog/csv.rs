//! CSV escaping and the per-table file sink.
//!
//! One CSV file per table, named `<tableName>.csv` in the output
//! directory. The header is the column names in schema order plus a fixed
//! trailing `latestSample` column; every data row carries the literal `0`
//! in that slot (the writer reserves it for a sample this decoder never
//! populates). Each file is created when its table begins and closed when
//! the table's row loop ends, before the next table starts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::perflog::container::{RowSink, TableBlock};
use crate::perflog::value::Value;
use crate::PerfError;

/// Name of the synthetic trailing header column.
pub const PLACEHOLDER_COLUMN: &str = "latestSample";

/// Constant value written in the trailing column of every data row.
pub const PLACEHOLDER_VALUE: &str = "0";

/// Escape one CSV field.
///
/// A field is quoted iff it contains a comma, a double quote, or a
/// newline; interior double quotes are doubled. Everything else is
/// written verbatim.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// [`RowSink`] that writes one CSV file per table into an output directory.
///
/// Existing files with the same name are overwritten, so a duplicated
/// table name within one container means last write wins.
pub struct CsvSink {
    out_dir: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl CsvSink {
    pub fn new(out_dir: &Path) -> Self {
        CsvSink {
            out_dir: out_dir.to_path_buf(),
            writer: None,
        }
    }

    /// Path of the CSV file for a table name.
    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.out_dir.join(format!("{table_name}.csv"))
    }

    fn io_err(context: &str, e: std::io::Error) -> PerfError {
        PerfError::Io(format!("{context}: {e}"))
    }
}

impl RowSink for CsvSink {
    fn begin_table(&mut self, table: &TableBlock) -> Result<(), PerfError> {
        let path = self.table_path(&table.name);
        let file = File::create(&path)
            .map_err(|e| Self::io_err(&format!("Cannot create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);

        let mut header: Vec<String> = table.columns.iter().map(|c| csv_escape(c)).collect();
        header.push(PLACEHOLDER_COLUMN.to_string());
        writeln!(writer, "{}", header.join(","))
            .map_err(|e| Self::io_err(&format!("Cannot write {}", path.display()), e))?;

        self.writer = Some(writer);
        Ok(())
    }

    fn row(&mut self, values: &[Value]) -> Result<(), PerfError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| PerfError::Io("row emitted outside a table".to_string()))?;

        let mut fields: Vec<String> = values.iter().map(|v| csv_escape(&v.render())).collect();
        fields.push(PLACEHOLDER_VALUE.to_string());
        writeln!(writer, "{}", fields.join(","))
            .map_err(|e| Self::io_err("Cannot write CSV row", e))
    }

    fn end_table(&mut self, table: &TableBlock, _rows: u64) -> Result<(), PerfError> {
        // Flush and drop the handle before the next table begins.
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                Self::io_err(
                    &format!("Cannot flush {}", self.table_path(&table.name).display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}
