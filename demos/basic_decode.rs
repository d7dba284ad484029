//! Basic example: load a schema, decode, validate and re-encode records

use fixwidth_core::{PrefixDetector, Record, RecordParser};

const SCHEMA: &str = r#"
sources:
  - source: payroll
    size: 45
    records:
      - type: employee
        fields:
          - { name: id, length: 5, type: INTEGER, required: true }
          - { name: name, length: 15 }
          - { name: email, length: 15 }
          - { name: status, length: 1, regex: "[AY N]" }
          - { name: amount, length: 9, type: DECIMAL }
      - type: total
        fields:
          - { name: tag, length: 5, regex: "TOTAL" }
          - { name: count, length: 6, type: INTEGER }
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fixwidth Basic Decode Example ===\n");

    let parser = RecordParser::from_yaml_str(SCHEMA)?;

    let lines = [
        "00001John           john@exam.com  Y1234.5678",
        "00002Jane           jane@exam.com  N 250.0000",
        "TOTAL000002",
    ];

    println!("Validating {} lines...", lines.len());
    for line in &lines[..2] {
        println!(
            "  {} -> {}",
            line,
            if parser.validate("payroll", "employee", line) {
                "valid"
            } else {
                "invalid"
            }
        );
    }

    println!("\nDecoding with prefix detection...");
    let detector = PrefixDetector::new()
        .with_prefix("TOTAL", "total")
        .with_prefix("0", "employee");
    let records: Vec<Record> = parser
        .decode_with_type_detection("payroll", lines, detector)
        .collect();

    for record in &records {
        println!("{}", record);
    }

    println!("Re-encoding the first record with a new amount...");
    let mut first = records[0].clone();
    first.put("amount", 99.5);
    if let Some(line) = parser.encode_record("payroll", &first) {
        println!("  '{}'", line);
    }

    println!("\nShort input decodes partially:");
    if let Some(partial) = parser.decode("payroll", "employee", "InvalidData") {
        print!("{}", partial);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
