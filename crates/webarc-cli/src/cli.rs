//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use webarc_core::ArchiveConfig;

#[derive(Parser)]
#[command(name = "webarc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Largest record payload to read (e.g. 64M, 2G)
    #[arg(long, global = true, value_parser = parse_byte_size, value_name = "SIZE")]
    pub max_record_size: Option<u64>,
}

impl Cli {
    /// Builds the archive configuration from global flags.
    pub fn archive_config(&self) -> ArchiveConfig {
        let config = ArchiveConfig::default();
        match self.max_record_size {
            Some(size) => config.with_max_record_size(size),
            None => config,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the format and compression detected from file names
    Detect(DetectArgs),
    /// List the records of an archive
    List(ListArgs),
    /// Write the payload of one record to stdout
    Cat(CatArgs),
    /// Copy records into another archive of the same format
    Copy(CopyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct DetectArgs {
    /// File names to classify (the files need not exist)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show every header field of each record
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct CatArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Zero-based index of the record
    #[arg(short = 'n', long, default_value = "0")]
    pub index: usize,
}

#[derive(clap::Args)]
pub struct CopyArgs {
    /// Archive to read from
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Archive to write to; a `.gz` suffix compresses each record
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Append to the output instead of replacing it
    #[arg(short, long)]
    pub append: bool,

    /// Overwrite output file if exists
    #[arg(short = 'f', long, conflicts_with = "append")]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
        .and_then(|n| {
            if n == 0 {
                Err("byte size must be greater than zero".to_string())
            } else {
                Ok(n)
            }
        })
}
