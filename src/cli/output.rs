//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::batch::BatchMetrics;
use crate::cli::args::{OutputFormat, SocialtokArgs};
use crate::error::Result;

/// Summary of a tokenize run, reported on stderr in verbose mode.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeSummary {
    pub documents: usize,
    pub tokens: usize,
    pub failed: u64,
    pub duration_ms: u64,
    pub docs_per_second: f64,
}

impl TokenizeSummary {
    pub fn new(results: &[Vec<String>], metrics: &BatchMetrics) -> Self {
        TokenizeSummary {
            documents: results.len(),
            tokens: results.iter().map(Vec::len).sum(),
            failed: metrics.documents_failed,
            duration_ms: metrics.total_execution_time.as_millis() as u64,
            docs_per_second: metrics.throughput(),
        }
    }
}

/// Format the tokens of one document.
pub fn format_tokens(tokens: &[String], args: &SocialtokArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(tokens.join(" ")),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(tokens)?),
        OutputFormat::Json => Ok(serde_json::to_string(tokens)?),
    }
}

/// Write one line per document.
pub fn write_results<W: Write>(
    writer: &mut W,
    results: &[Vec<String>],
    args: &SocialtokArgs,
) -> Result<()> {
    for tokens in results {
        writeln!(writer, "{}", format_tokens(tokens, args)?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a serializable value (configuration, summary) in the chosen format.
pub fn write_value<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    args: &SocialtokArgs,
) -> Result<()> {
    let text = match args.output_format {
        OutputFormat::Json if !args.pretty => serde_json::to_string(value)?,
        _ => serde_json::to_string_pretty(value)?,
    };
    writeln!(writer, "{text}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(format: &str) -> SocialtokArgs {
        SocialtokArgs::try_parse_from(["socialtok", "--format", format, "tokenize"]).unwrap()
    }

    #[test]
    fn test_human_output() {
        let results = vec![
            vec!["cold".to_string(), "beer".to_string()],
            Vec::new(),
        ];
        let mut buffer = Vec::new();
        write_results(&mut buffer, &results, &args("human")).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "cold beer\n\n");
    }

    #[test]
    fn test_json_output() {
        let results = vec![vec!["POS_EMOJI".to_string(), "beer".to_string()]];
        let mut buffer = Vec::new();
        write_results(&mut buffer, &results, &args("json")).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "[\"POS_EMOJI\",\"beer\"]\n"
        );
    }
}
