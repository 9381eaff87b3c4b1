//! CLI subcommand implementations for the `perfconv` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`].
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a `pub fn execute(opts, writer) ->
//! Result<(), PerfError>` entry point. The `writer: &mut dyn Write`
//! parameter allows output to be captured in tests or redirected to a
//! file via the global `--output` flag.
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `perfconv convert` | [`convert`] | Decode a container into per-table CSV files plus a JSON summary |
//! | `perfconv inspect` | [`inspect`] | List version, tables, columns, and row counts without writing files |
//!
//! The `wprintln!` macro wraps `writeln!` to convert `io::Error` into
//! `PerfError`.

pub mod app;
pub mod convert;
pub mod inspect;

/// Write a line to the given writer, converting io::Error to PerfError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::PerfError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::PerfError::Io(e.to_string()))
    };
}

pub(crate) use wprintln;
