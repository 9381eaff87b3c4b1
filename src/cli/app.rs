use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "perfconv")]
#[command(about = "Performance log container decoding toolkit")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a container into per-table CSV files and a JSON summary
    Convert {
        /// Path to the gzip-compressed log container
        #[arg(short, long)]
        input: String,

        /// Output directory for CSV files (created if absent)
        #[arg(short = 'd', long = "out-dir")]
        out_dir: String,

        /// Display the output path written for each table
        #[arg(short, long)]
        verbose: bool,
    },

    /// List version, tables, and row counts without writing files
    Inspect {
        /// Path to the gzip-compressed log container
        #[arg(short, long)]
        input: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}
