//! Command line argument parsing for the socialtok CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// socialtok - tokenize tweets, Reddit posts and other social-media text
#[derive(Parser, Debug, Clone)]
#[command(name = "socialtok")]
#[command(about = "A configurable tokenizer for noisy social-media text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SocialtokArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SocialtokArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize documents, one per input line
    Tokenize(TokenizeArgs),

    /// Print the effective tokenizer configuration
    Config(ConfigArgs),
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Input file with one document per line (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Tokenizer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SOCIALTOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Documents handed to a worker at a time
    #[arg(short, long, default_value = "256")]
    pub batch_size: usize,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Word-frequency file for hashtag segmentation
    #[arg(long, value_name = "DICTIONARY_FILE")]
    pub dictionary: Option<PathBuf>,

    /// Stop at the first document that fails instead of printing an empty line
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for printing the configuration
#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file to load and validate (defaults if omitted)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SOCIALTOK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Space-separated tokens
    Human,
    /// JSON arrays
    Json,
}
