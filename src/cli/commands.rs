//! Command implementations for the socialtok CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, info};

use crate::batch::{BatchConfig, BatchTokenizer, FailurePolicy};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TokenizerConfig;
use crate::error::{Result, SocialtokError};
use crate::social_tokenizer::SocialTokenizer;

/// Execute a CLI command.
pub fn execute_command(args: SocialtokArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args),
        Command::Config(config_args) => show_config(config_args, &args),
    }
}

/// Load a configuration file, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<TokenizerConfig> {
    match path {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            TokenizerConfig::from_json_file(path).map_err(|e| {
                SocialtokError::configuration(format!(
                    "failed to load configuration '{}': {e}",
                    path.display()
                ))
            })
        }
        None => Ok(TokenizerConfig::default()),
    }
}

/// Read one raw document per line. Lines are not decoded here, so a line
/// with invalid UTF-8 becomes a per-document failure in the batch instead of
/// failing the whole read. A trailing `\r` is dropped.
pub fn read_documents<R: Read>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut documents = Vec::new();
    for line in BufReader::new(reader).split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        documents.push(line);
    }
    Ok(documents)
}

/// Tokenize the input, one document per line.
fn tokenize(args: &TokenizeArgs, cli_args: &SocialtokArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dictionary) = &args.dictionary {
        config.hashtag_dictionary = Some(dictionary.clone());
    }
    let tokenizer = SocialTokenizer::new(config)?;

    let documents = match &args.input {
        Some(path) => read_documents(File::open(path)?)?,
        None => read_documents(io::stdin().lock())?,
    };
    info!("read {} documents", documents.len());

    let mut batch_config = BatchConfig::new(
        args.batch_size,
        args.workers.unwrap_or_else(num_cpus::get),
    );
    if args.fail_fast {
        batch_config = batch_config.with_failure_policy(FailurePolicy::Abort);
    }
    let engine = BatchTokenizer::new(tokenizer, batch_config)?;
    let results = engine.tokenize_bytes(&documents)?;

    let stdout = io::stdout();
    write_results(&mut stdout.lock(), &results, cli_args)?;

    if cli_args.verbosity() > 1 {
        let summary = TokenizeSummary::new(&results, &engine.metrics());
        write_value(&mut io::stderr(), &summary, cli_args)?;
    }
    Ok(())
}

/// Print the effective configuration after validation.
fn show_config(args: &ConfigArgs, cli_args: &SocialtokArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;
    write_value(&mut io::stdout(), &config, cli_args)
}
