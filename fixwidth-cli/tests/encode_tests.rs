use fixwidth_cli::commands::{encode, inspect};
use std::fs;
use tempfile::tempdir;

const SCHEMA: &str = r#"
sources:
  - source: crm
    records:
      - type: contact
        fields:
          - { name: first, length: 4 }
          - { name: last, length: 5 }
          - { name: vip, length: 1, type: BOOLEAN }
      - type: card
        total_length: 12
        fields:
          - { name: code, position: 1, length: 3 }
          - { name: owner, position: 5, length: 8 }
"#;

#[test]
fn test_encode_json_array() {
    let td = tempdir().unwrap();
    let schema = td.path().join("schema.yaml");
    let input = td.path().join("contacts.json");
    let output = td.path().join("contacts.txt");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(
        &input,
        r#"[
            {"first": "John", "last": "Smith", "vip": true},
            {"first": "Jonathan", "last": null},
            {"last": "Lee", "extra": 42}
        ]"#,
    )
    .unwrap();

    let result = encode::execute(
        schema.to_str().unwrap(),
        "crm",
        "contact",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    );
    assert!(result.is_ok());

    let lines: Vec<String> = fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(lines, vec!["JohnSmitht", "Jona      ", "    Lee   "]);
}

#[test]
fn test_encode_positional() {
    let td = tempdir().unwrap();
    let schema = td.path().join("schema.yaml");
    let input = td.path().join("cards.json");
    let output = td.path().join("cards.txt");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(&input, r#"[{"code": "VIS", "owner": "A. Jones"}]"#).unwrap();

    let result = encode::execute(
        schema.to_str().unwrap(),
        "crm",
        "card",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    );
    assert!(result.is_ok());
    assert_eq!(fs::read_to_string(&output).unwrap(), "VIS A. Jones\n");
}

#[test]
fn test_encode_rejects_non_objects() {
    let td = tempdir().unwrap();
    let schema = td.path().join("schema.yaml");
    let input = td.path().join("bad.json");
    let output = td.path().join("out.txt");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(&input, r#"["John"]"#).unwrap();

    let result = encode::execute(
        schema.to_str().unwrap(),
        "crm",
        "contact",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    );
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_encode_invalid_json() {
    let td = tempdir().unwrap();
    let schema = td.path().join("schema.yaml");
    let input = td.path().join("bad.json");
    let output = td.path().join("out.txt");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(&input, "not json").unwrap();

    let result = encode::execute(
        schema.to_str().unwrap(),
        "crm",
        "contact",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    );
    assert!(result.is_err());
}

#[test]
fn test_inspect_schema() {
    let td = tempdir().unwrap();
    let schema = td.path().join("schema.yaml");
    fs::write(&schema, SCHEMA).unwrap();

    assert!(inspect::execute(schema.to_str().unwrap()).is_ok());
    assert!(inspect::execute(td.path().join("missing.yaml").to_str().unwrap()).is_err());
}
