//! CLI implementation for the `perfconv convert` subcommand.
//!
//! Creates the output directory, decodes the whole container through the
//! CSV sink, writes the JSON summary, and prints one progress line per
//! table. Fatal decode errors propagate to `main`; CSV files already
//! completed for earlier tables are left in place.

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::cli::wprintln;
use crate::perflog::container;
use crate::perflog::csv::CsvSink;
use crate::perflog::stream::PerfStream;
use crate::perflog::summary;
use crate::PerfError;

/// Options for the `perfconv convert` subcommand.
pub struct ConvertOptions {
    /// Path to the gzip-compressed log container.
    pub input: String,
    /// Output directory for CSV files (created if absent).
    pub out_dir: String,
    /// Display per-table column schemas.
    pub verbose: bool,
}

/// Convert a container into per-table CSV files plus the JSON summary.
pub fn execute(opts: &ConvertOptions, writer: &mut dyn Write) -> Result<(), PerfError> {
    let out_dir = Path::new(&opts.out_dir);
    crate::util::fs::ensure_dir(out_dir)?;

    let mut stream = PerfStream::open(&opts.input)?;
    let mut sink = CsvSink::new(out_dir);
    let (version, summaries) = container::convert(&mut stream, &mut sink)?;

    wprintln!(writer, "Container version: {}", version)?;
    for s in &summaries {
        wprintln!(
            writer,
            "{} {} ({} rows)",
            "Converted".green(),
            s.table_name,
            s.rows
        )?;
        if opts.verbose {
            wprintln!(writer, "  -> {}", sink.table_path(&s.table_name).display())?;
        }
    }

    let summary_path = summary::write_summary(out_dir, &summaries)?;
    wprintln!(
        writer,
        "{} {} tables, summary: {}",
        "Done:".green(),
        summaries.len(),
        summary_path.display()
    )?;

    Ok(())
}
