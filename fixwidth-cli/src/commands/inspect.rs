use anyhow::Result;
use colored::*;
use fixwidth_core::{Layout, RecordSchema};
use tracing::info;

use super::load_parser;

pub fn execute(schema: &str) -> Result<()> {
    info!("Inspecting schema: {}", schema);

    let parser = load_parser(schema)?;
    let registry = parser.registry();

    if registry.source_count() == 0 {
        println!("{} No sources declared", "✗".red());
        return Ok(());
    }

    for source in registry.sources() {
        println!("\n=== Source {} ===", source.name().bold());
        println!("Max size:          {}", source.max_size());
        println!("Record types:      {}", source.record_type_count());

        for record in source.record_types() {
            print_record(record);
        }
    }

    Ok(())
}

fn print_record(record: &RecordSchema) {
    let layout = match record.layout() {
        Layout::Sequential => "sequential".to_string(),
        Layout::Positional {
            declared_total: Some(total),
        } => format!("positional, declared length {}", total),
        Layout::Positional { .. } => "positional".to_string(),
    };

    println!(
        "\n  {} ({}, {} characters)",
        record.name().cyan(),
        layout,
        record.total_length()
    );
    println!(
        "  {:<20} {:>6} {:>6} {:<8} {}",
        "FIELD", "START", "WIDTH", "TYPE", "FLAGS"
    );

    for field in record.fields() {
        let mut flags = Vec::new();
        if field.is_required() {
            flags.push("required".to_string());
        }
        if let Some(pattern) = field.pattern() {
            flags.push(format!("pattern={}", pattern.as_str()));
        }
        if let Some(default) = field.default_value() {
            flags.push(format!("default='{}'", default));
        }
        if !field.trims() {
            flags.push("untrimmed".to_string());
        }

        println!(
            "  {:<20} {:>6} {:>6} {:<8} {}",
            field.name(),
            field.position(),
            field.length(),
            field.field_type().name(),
            flags.join(" ")
        );
    }

    if record.trims_output() {
        println!("  {} encoded lines are trimmed", "!".yellow());
    }
}
