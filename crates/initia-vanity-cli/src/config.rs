//! Command-line configuration

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use initia_vanity_core::{Position, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "initia-vanity")]
#[command(version)]
#[command(about = "Generate vanity addresses for Initia")]
#[command(long_about = "Initia Vanity Address Generator

Searches for secp256k1 keys whose Initia (Cosmos SDK, bech32) address matches a
pattern at the start, end, or anywhere in the address. All generated addresses
start with 'init1'.")]
#[command(after_help = "Examples:
  initia-vanity -p end alice
  initia-vanity -p any -c 3 --stats bob
  initia-vanity -p start --case-sensitive Charlie
  initia-vanity -p end --use-mnemonic alice
  initia-vanity -p end --use-mnemonic --mnemonic \"your twelve words here\" alice
  initia-vanity -p any --format json -o addresses.json alice
  initia-vanity -p end -t 8 bob")]
pub struct Cli {
    /// Pattern to search for
    pub pattern: Option<String>,

    /// Match position in address: start (after init1), end, any
    #[arg(short, long, default_value = "end")]
    pub position: String,

    /// Enable case-sensitive pattern matching
    #[arg(long)]
    pub case_sensitive: bool,

    /// Number of matching addresses to generate
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Use mnemonic-based key generation instead of random
    #[arg(long)]
    pub use_mnemonic: bool,

    /// Mnemonic phrase to derive from (generated per attempt if not provided)
    #[arg(long)]
    pub mnemonic: Option<String>,

    /// Account number for the HD derivation path
    #[arg(long, default_value_t = 0)]
    pub account: u32,

    /// Address index for the HD derivation path
    #[arg(long, default_value_t = 0)]
    pub address_index: u32,

    /// Number of threads for parallel processing
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Show performance statistics
    #[arg(long)]
    pub stats: bool,

    /// Output file path (prints to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Stop after this many seconds and keep what was found
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub pattern: String,
    pub position: Position,
    pub case_sensitive: bool,
    pub count: usize,
    pub use_mnemonic: bool,
    pub mnemonic: Option<String>,
    pub account: u32,
    pub address_index: u32,
    pub threads: usize,
    pub stats: bool,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub quiet: bool,
    pub timeout: Option<u64>,
}

impl Config {
    /// Check the arguments before any search work starts
    pub fn from_cli(cli: Cli, pattern: String) -> Result<Self> {
        let position: Position = cli.position.parse()?;

        if pattern.is_empty() {
            bail!("pattern cannot be empty");
        }
        if cli.threads < 1 {
            bail!("number of threads must be at least 1");
        }
        if cli.count < 1 {
            bail!("count must be at least 1");
        }
        if cli.use_mnemonic && cli.mnemonic.is_some() && cli.count > 1 {
            bail!("a supplied mnemonic yields a single address; --count must be 1 with --mnemonic");
        }
        if cli.timeout == Some(0) {
            bail!("timeout must be at least 1 second");
        }

        Ok(Self {
            pattern,
            position,
            case_sensitive: cli.case_sensitive,
            count: cli.count,
            use_mnemonic: cli.use_mnemonic,
            mnemonic: cli.mnemonic,
            account: cli.account,
            address_index: cli.address_index,
            threads: cli.threads,
            stats: cli.stats,
            output: cli.output,
            format: cli.format,
            quiet: cli.quiet,
            timeout: cli.timeout,
        })
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            pattern: self.pattern.clone(),
            position: self.position,
            case_sensitive: self.case_sensitive,
            target_count: self.count,
            mnemonic_mode: self.use_mnemonic,
            supplied_mnemonic: if self.use_mnemonic { self.mnemonic.clone() } else { None },
            account: self.account,
            address_index: self.address_index,
            ..Default::default()
        }
    }
}
