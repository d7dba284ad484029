use anyhow::{anyhow, bail, Context, Result};
use fixwidth_core::encode_with_diagnostics;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use tracing::{info, warn};

use super::{load_parser, read_input};

/// Flatten one JSON object into field text; nulls and nested values are skipped
fn field_values(object: &serde_json::Map<String, Value>) -> BTreeMap<String, String> {
    object
        .iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((name.clone(), text))
        })
        .collect()
}

pub fn execute(
    schema: &str,
    source: &str,
    record_type: &str,
    input: &str,
    output: &str,
) -> Result<()> {
    info!("Encoding records from {} to {}", input, output);

    let parser = load_parser(schema)?;
    let record_schema = parser
        .schema(source, record_type)
        .ok_or_else(|| anyhow!("Unknown record type {} for source {}", record_type, source))?;

    let content = read_input(input)?;
    let items: Vec<Value> =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON input")?;

    info!("Found {} records to encode", items.len());

    let mut output_data = String::new();
    for (i, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            bail!("Record {} is not a JSON object", i + 1);
        };

        let (line, diagnostics) = encode_with_diagnostics(record_schema, &field_values(object));
        for diagnostic in &diagnostics {
            warn!("Record {}: {}", i + 1, diagnostic);
        }

        output_data.push_str(&line);
        output_data.push('\n');
    }

    fs::write(output, &output_data)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully encoded {} records ({} characters per line)",
        items.len(),
        record_schema.total_length()
    );

    Ok(())
}
