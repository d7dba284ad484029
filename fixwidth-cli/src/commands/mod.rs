//! Subcommand implementations; each exposes an `execute` function.

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod validate;

use anyhow::{Context, Result};
use fixwidth_core::RecordParser;
use std::fs;
use std::io::{self, Read};
use tracing::info;

/// Load a schema document into a parser
pub fn load_parser(schema: &str) -> Result<RecordParser> {
    let parser = RecordParser::from_yaml_file(schema)
        .with_context(|| format!("Failed to load schema file: {}", schema))?;

    info!(
        "Loaded {} sources from {}",
        parser.registry().source_count(),
        schema
    );

    Ok(parser)
}

/// Read an input file, or stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| "Failed to read stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
}
