//! Property-based tests using proptest

use fixwidth_core::{
    decode_record, encode_record, validate_record, FieldSchema, FieldType, Record, RecordSchema,
    Value,
};
use proptest::prelude::*;

fn schema() -> RecordSchema {
    RecordSchema::sequential("props")
        .field(
            FieldSchema::new("id", 6)
                .unwrap()
                .with_type(FieldType::Integer)
                .required(true),
        )
        .field(FieldSchema::new("name", 12).unwrap())
        .field(FieldSchema::new("flag", 5).unwrap().with_type(FieldType::Boolean))
        .field(FieldSchema::new("code", 4).unwrap().with_pattern("[A-Z]{2}\\d{2}").unwrap())
        .field(FieldSchema::new("amount", 10).unwrap().with_type(FieldType::Decimal))
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_round_trip_encode_decode(
        id in 0i64..1_000_000,
        name in "[A-Za-z][A-Za-z0-9 ]{0,10}[A-Za-z0-9]",
        flag in any::<bool>(),
        code in "[A-Z]{2}[0-9]{2}",
        cents in -9_999_999i64..9_999_999,
    ) {
        let amount = cents as f64 / 100.0;
        let schema = schema();
        let record = Record::new("props")
            .with("id", id)
            .with("name", name.as_str())
            .with("flag", flag)
            .with("code", code.as_str())
            .with("amount", amount);

        let encoded = encode_record(&schema, &record);
        prop_assert_eq!(encoded.chars().count(), 37);
        prop_assert!(validate_record(&schema, &encoded));

        let decoded = decode_record(&schema, &encoded).unwrap();
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn prop_validation_is_idempotent(raw in "\\PC{0,40}") {
        let schema = schema();
        let first = validate_record(&schema, &raw);
        let second = validate_record(&schema, &raw);

        prop_assert_eq!(first, second);
        prop_assert_eq!(schema.total_length(), 37);
    }

    #[test]
    fn prop_wrong_length_never_validates(raw in "[0-9A-Z ]{0,60}") {
        prop_assume!(raw.chars().count() != 37);
        prop_assert!(!validate_record(&schema(), &raw));
    }

    #[test]
    fn prop_decode_never_panics(raw in "\\PC{0,60}") {
        let schema = schema();
        match decode_record(&schema, &raw) {
            None => prop_assert!(raw.is_empty()),
            Some(record) => prop_assert_eq!(record.record_type(), "props"),
        }
    }

    #[test]
    fn prop_malformed_integer_decodes_to_null(junk in "[a-z]{6}") {
        let schema = schema();
        let raw = format!("{}{:<12}{:<5}{}{:<10}", junk, "name", "true", "AB12", "-12.5");

        let record = decode_record(&schema, &raw).unwrap();
        prop_assert_eq!(record.get("id"), Some(&Value::Null));
        prop_assert_eq!(record.as_int("id"), 0);
        prop_assert_eq!(record.as_string("name"), "name");
        prop_assert_eq!(record.get("amount"), Some(&Value::Decimal(-12.5)));
    }

    #[test]
    fn prop_sequential_offsets_are_cumulative(
        lengths in prop::collection::vec(1usize..20, 1..10)
    ) {
        let mut builder = RecordSchema::sequential("offsets");
        for (i, length) in lengths.iter().enumerate() {
            builder = builder.field(FieldSchema::new(format!("f{}", i), *length).unwrap());
        }
        let schema = builder.build().unwrap();

        let mut expected = 0;
        for (field, length) in schema.fields().iter().zip(&lengths) {
            prop_assert_eq!(field.offset(), expected);
            expected += length;
        }
        prop_assert_eq!(schema.total_length(), expected);
    }
}
