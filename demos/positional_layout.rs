//! Positional layouts declared on a Rust type

use fixwidth_core::{FieldDescriptor, FieldSource, FieldType, FixedLayout, LayoutRegistry, Record};

#[derive(Debug)]
struct Shipment {
    carrier: String,
    weight: f64,
    fragile: bool,
    destination: String,
}

impl FieldSource for Shipment {
    fn field_text(&self, name: &str) -> Option<String> {
        match name {
            "carrier" => Some(self.carrier.clone()),
            "weight" => Some(format!("{:.2}", self.weight)),
            "fragile" => Some(if self.fragile { "Y" } else { "N" }.to_string()),
            "destination" => Some(self.destination.clone()),
            _ => None,
        }
    }
}

impl FixedLayout for Shipment {
    const RECORD_NAME: &'static str = "shipment";
    const TOTAL_LENGTH: Option<usize> = Some(32);
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new("carrier", 1, 4),
        FieldDescriptor::new("weight", 6, 7).with_type(FieldType::Decimal),
        FieldDescriptor::new("fragile", 14, 1).with_default("N"),
        FieldDescriptor::new("destination", 16, 17).with_default("UNKNOWN"),
    ];

    fn from_record(record: &Record) -> Self {
        Shipment {
            carrier: record.as_string("carrier"),
            weight: record.as_double("weight"),
            fragile: record.as_string("fragile") == "Y",
            destination: record.as_string("destination"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fixwidth Positional Layout Example ===\n");

    let layouts = LayoutRegistry::new();

    let shipment = Shipment {
        carrier: "UPSX".to_string(),
        weight: 12.5,
        fragile: true,
        destination: "Rotterdam Harbour Terminal".to_string(),
    };

    let (line, diagnostics) = layouts.serialize_with_diagnostics(&shipment)?;
    println!("Serialized: '{}'", line);
    for diagnostic in &diagnostics {
        println!("  note: {}", diagnostic);
    }

    let parsed: Shipment = layouts.parse(&line)?;
    println!("Parsed back: {:?}", parsed);

    let short: Shipment = layouts.parse("DHL  0.75")?;
    println!("Short line with defaults: {:?}", short);

    println!("\nCached layouts: {}", layouts.cached_count());
    println!("\n=== Example Complete ===");
    Ok(())
}
