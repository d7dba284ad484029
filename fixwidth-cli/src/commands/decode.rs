use anyhow::{bail, Context, Result};
use fixwidth_core::{PrefixDetector, Record};
use serde::Serialize;
use std::fs;
use tracing::info;

use super::{load_parser, read_input};

#[derive(Serialize)]
struct DecodedRecord<'a> {
    record_type: &'a str,
    fields: &'a Record,
}

pub fn execute(
    schema: &str,
    source: &str,
    record_type: Option<&str>,
    detect: &[(String, String)],
    input: &str,
    output: Option<&str>,
) -> Result<()> {
    info!("Decoding file: {}", input);

    let parser = load_parser(schema)?;
    if !parser.registry().has_source(source) {
        bail!("Unknown source: {}", source);
    }
    if let Some(record_type) = record_type {
        if parser.schema(source, record_type).is_none() {
            bail!("Unknown record type {} for source {}", record_type, source);
        }
    }

    let content = read_input(input)?;
    let lines: Vec<&str> = content.lines().collect();

    let records: Vec<Record> = match (record_type, detect.is_empty()) {
        (Some(record_type), _) => parser.decode_all(source, record_type, &lines).collect(),
        (None, false) => {
            let detector = detect
                .iter()
                .fold(PrefixDetector::new(), |detector, (prefix, record_type)| {
                    detector.with_prefix(prefix.as_str(), record_type.as_str())
                });
            parser
                .decode_with_type_detection(source, &lines, detector)
                .collect()
        }
        (None, true) => bail!("Either --record-type or at least one --detect rule is required"),
    };

    let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();

    println!("\n=== Decode Results ===");
    println!("Lines read:        {}", lines.len());
    println!("Records decoded:   {}", records.len());
    println!("Lines skipped:     {}", non_blank.saturating_sub(records.len()));
    println!();

    let decoded: Vec<DecodedRecord> = records
        .iter()
        .map(|record| DecodedRecord {
            record_type: record.record_type(),
            fields: record,
        })
        .collect();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&decoded)
            .with_context(|| "Failed to serialize decoded records")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded records written to: {}", output_path);
    } else {
        println!("=== Decoded Records ===");
        for record in &records {
            print!("{}", record);
        }
    }

    Ok(())
}
