//! CLI tool for browsing segment archive catalogs.

mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snafu::ResultExt;

use segment_archive_core::{
    archive,
    catalog::{self, Source},
    storage::ArchiveFile,
};

use crate::error::{CatalogSnafu, CliResult, OpenArchiveSnafu, ReadArchiveSnafu};

#[derive(Debug, Subcommand)]
enum Command {
    /// List a directory's archive files in start-time order
    Catalog {
        /// Directory to scan
        #[arg(long)]
        dir: PathBuf,

        /// Print parsed fields (prefix, t0, length, suffix) instead of paths
        #[arg(long)]
        parsed: bool,
    },

    /// Show an archive's start time and per-channel metadata
    Inspect {
        /// Archive file to open
        file: PathBuf,

        /// Channels to show; defaults to every channel in the file
        channels: Vec<String>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "segarc", version, about = "Browse segment archive catalogs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn cmd_catalog(dir: PathBuf, parsed: bool) -> CliResult<()> {
    if parsed {
        for name in catalog::sort_matches(Source::Directory(dir)).context(CatalogSnafu)? {
            println!(
                "{}\t{}\t{}\t{}",
                name.prefix, name.t0, name.length, name.suffix
            );
        }
    } else {
        for file in catalog::sort(Source::Directory(dir)).context(CatalogSnafu)? {
            println!("{file}");
        }
    }
    Ok(())
}

fn cmd_inspect(file: PathBuf, channels: Vec<String>) -> CliResult<()> {
    let handle = ArchiveFile::open(&file).context(OpenArchiveSnafu { path: &file })?;
    let t0 = handle
        .attr(archive::T0_ATTR)
        .context(OpenArchiveSnafu { path: &file })?;
    let names: Vec<String> = if channels.is_empty() {
        handle.dataset_names().map(str::to_string).collect()
    } else {
        channels
    };
    drop(handle);

    let requested: Vec<&str> = names.iter().map(String::as_str).collect();
    let data = archive::read(&file, &requested).context(ReadArchiveSnafu { path: &file })?;

    println!("{}: t0={t0}", file.display());
    for (name, series) in data.iter() {
        println!(
            "  {name}: {} samples @ {} Hz ({} s)",
            series.len(),
            series.sample_rate,
            series.duration()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Catalog { dir, parsed } => cmd_catalog(dir, parsed),
        Command::Inspect { file, channels } => cmd_inspect(file, channels),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
