//! # uniprot-scan
//!
//! A command-line tool for scanning gzip-compressed UniProtKB XML archives.
//!
//! ## Usage
//!
//! ```bash
//! # One summary line per entry, stopping after the first 100
//! uniprot-scan scan uniprot_sprot.xml.gz --limit 100
//!
//! # One JSON document per entry
//! uniprot-scan scan uniprot_sprot.xml.gz --json
//!
//! # Archive totals
//! uniprot-scan -v info uniprot_sprot.xml.gz
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use uniprot_stream::uniprot::UniProtStreamer;

/// uniprot-stream - Streaming UniProtKB Archive Scanner
#[derive(Parser)]
#[command(name = "uniprot-scan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream an archive and print one line per entry
    Scan {
        /// Input archive path (.xml.gz)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Stop after this many entries
        #[arg(short, long)]
        limit: Option<u64>,

        /// Emit one JSON document per entry instead of summary lines
        #[arg(long)]
        json: bool,

        /// Skip entries that fail to decode instead of stopping
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Stream an archive once and print whole-archive totals
    Info {
        /// Input archive path (.xml.gz)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Scan {
            input,
            limit,
            json,
            skip_invalid,
        } => run_scan(input, limit, json, skip_invalid),
        Commands::Info { input } => run_info(input),
    }
}

/// Stream the archive and print per-entry summaries
fn run_scan(input: PathBuf, limit: Option<u64>, json: bool, skip_invalid: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    info!("Scanning {}", input.display());

    let streamer = UniProtStreamer::open(&input)
        .context("Failed to open archive")?
        .skip_invalid(skip_invalid);

    let mut yielded: u64 = 0;
    for result in streamer.entries() {
        let entry = result.with_context(|| format!("Scan of {} failed", input.display()))?;

        if json {
            println!("{}", serde_json::to_string(&entry)?);
        } else {
            println!(
                "{}\t{}\t{} aa",
                entry.canonical_accession().unwrap_or("-"),
                entry.primary_name().unwrap_or("-"),
                entry.sequence.length
            );
        }

        yielded += 1;
        if limit.is_some_and(|l| yielded >= l) {
            info!("Stopping early after {} entries", yielded);
            break;
        }
    }

    info!("Scanned {} entries", yielded);
    Ok(())
}

/// Stream the archive once and print totals
fn run_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let streamer = UniProtStreamer::open(&input).context("Failed to open archive")?;

    let mut entries: u64 = 0;
    let mut features: u64 = 0;
    let mut references: u64 = 0;
    let mut comments: u64 = 0;
    let mut residues: u64 = 0;
    let mut dataset = String::new();

    for result in streamer.entries() {
        let entry = result.with_context(|| format!("Scan of {} failed", input.display()))?;
        entries += 1;
        features += entry.features.len() as u64;
        references += entry.references.len() as u64;
        comments += entry.comments.len() as u64;
        residues += entry.sequence.residue_count() as u64;
        if dataset.is_empty() {
            dataset = entry.dataset.clone();
        }
    }

    println!("UniProt Archive Information");
    println!("===========================");
    println!("File: {}", input.display());
    println!();
    println!(
        "Dataset:    {}",
        if dataset.is_empty() { "-" } else { dataset.as_str() }
    );
    println!("Entries:    {}", entries);
    println!("Features:   {}", features);
    println!("References: {}", references);
    println!("Comments:   {}", comments);
    println!("Residues:   {}", residues);

    Ok(())
}
