//! Bootstrap a per-parameter TOML database from `kernel-parameters.txt`.
//!
//! Usage: kparams [OPTIONS] <PARAMETERS> [OUTDIR]
//!
//! Every parameter lands in `<OUTDIR>/<name>/parameter.toml`. With `--dump`
//! the parsed definitions are also printed to stdout as a text listing or
//! YAML; `--no-write` skips the database entirely.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use libkparams::{dump, parse_reader, DuplicatePolicy, ParseContext};
use log::LevelFilter;

mod database;
mod transcode;

#[derive(Parser, Debug)]
#[command(name = "kparams", version, about)]
struct Cli {
    /// Path to the kernel-parameters.txt document
    #[arg(value_name = "PARAMETERS")]
    parameters: PathBuf,

    /// Database output directory
    #[arg(value_name = "OUTDIR", default_value = "database/")]
    outdir: PathBuf,

    /// Print the parsed parameter definitions to stdout
    #[arg(long, visible_aliases = ["dump-parameters", "dumpparameters"])]
    dump: bool,

    /// Listing format for --dump
    #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
    dump_format: DumpFormat,

    /// Processor recorded in every document
    #[arg(long, default_value = "kernel")]
    processor: String,

    /// Parse only; do not write the database
    #[arg(long)]
    no_write: bool,

    /// Fail on a repeated parameter name instead of keeping the last one
    #[arg(long)]
    reject_duplicates: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DumpFormat {
    Text,
    Yaml,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn duplicates(&self) -> DuplicatePolicy {
        if self.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Replace
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let path = cli.parameters.display().to_string();
    let file = File::open(&cli.parameters).with_context(|| format!("cannot read {}", path))?;

    let ctx = ParseContext::new(Some(path.as_str())).with_duplicates(cli.duplicates());
    let entries = parse_reader(BufReader::new(file), &ctx)
        .with_context(|| format!("cannot parse {}", path))?;
    log::info!("parsed {} parameters from {}", entries.len(), path);

    if cli.dump {
        match cli.dump_format {
            DumpFormat::Text => print!("{}", dump(&entries)),
            DumpFormat::Yaml => {
                let yaml = transcode::yaml::encode(&entries).map_err(|e| anyhow!(e))?;
                print!("{}", yaml);
            }
        }
    }

    if cli.no_write {
        return Ok(());
    }
    let written = database::write_database(&entries, &cli.outdir, &cli.processor)?;
    log::info!("wrote {} documents under {}", written, cli.outdir.display());
    Ok(())
}
