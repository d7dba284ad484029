use anyhow::{bail, Result};
use colored::*;
use fixwidth_core::{RecordParser, ValidationError};
use tracing::{info, warn};

use super::{load_parser, read_input};

/// Outcome of validating every line of an input
#[derive(Debug, Default)]
pub struct ValidationSummary {
    /// Lines that passed the strict gate
    pub valid: usize,
    /// Failing lines with their 1-based line numbers
    pub failures: Vec<(usize, ValidationError)>,
}

impl ValidationSummary {
    /// Number of failing lines
    pub fn invalid(&self) -> usize {
        self.failures.len()
    }
}

/// Run the strict gate over each non-blank line
pub fn validate_lines(
    parser: &RecordParser,
    source: &str,
    record_type: &str,
    content: &str,
) -> ValidationSummary {
    let mut summary = ValidationSummary::default();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parser.validate_detailed(source, record_type, line) {
            Ok(()) => summary.valid += 1,
            Err(e) => {
                warn!("Line {} failed validation: {}", index + 1, e);
                summary.failures.push((index + 1, e));
            }
        }
    }

    summary
}

pub fn execute(schema: &str, source: &str, record_type: &str, input: &str) -> Result<()> {
    info!("Validating file: {}", input);

    let parser = load_parser(schema)?;
    if parser.schema(source, record_type).is_none() {
        bail!("Unknown record type {} for source {}", record_type, source);
    }

    let content = read_input(input)?;
    let summary = validate_lines(&parser, source, record_type, &content);

    println!("\n=== Validation Results ===");
    println!("Valid lines:       {}", summary.valid.to_string().green());
    if summary.invalid() > 0 {
        println!("Invalid lines:     {}", summary.invalid().to_string().red());
    } else {
        println!("Invalid lines:     {}", summary.invalid());
    }

    if summary.failures.is_empty() {
        println!("{} All lines valid", "✓".green());
    } else {
        println!("\n=== Failures ===");
        for (line, error) in &summary.failures {
            println!("{} line {}: {}", "✗".red(), line, error);
        }
    }

    Ok(())
}
