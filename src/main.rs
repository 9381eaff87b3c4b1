#[cfg(not(feature = "cli"))]
compile_error!("The `perfconv` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use pfl::cli;
use pfl::cli::app::{Cli, ColorMode, Commands};
use pfl::PerfError;

fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, PerfError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| PerfError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Convert {
            input,
            out_dir,
            verbose,
        } => cli::convert::execute(
            &cli::convert::ConvertOptions {
                input,
                out_dir,
                verbose,
            },
            &mut writer,
        ),

        Commands::Inspect { input, json } => cli::inspect::execute(
            &cli::inspect::InspectOptions { input, json },
            &mut writer,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
