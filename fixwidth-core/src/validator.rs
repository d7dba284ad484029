//! Strict validation gate
//!
//! Unlike decode, this rejects on the first problem: the raw length must
//! match the schema exactly, then every field window must pass the same
//! per-field check decode uses.

use crate::decoder::char_window;
use crate::error::ValidationError;
use crate::schema::RecordSchema;

#[cfg(feature = "logging")]
use tracing::warn;

/// Check a raw record against its schema
pub fn validate_record(schema: &RecordSchema, raw: &str) -> bool {
    validate_detailed(schema, raw).is_ok()
}

/// Check a raw record against its schema, reporting the first failure
pub fn validate_detailed(schema: &RecordSchema, raw: &str) -> Result<(), ValidationError> {
    let actual = raw.chars().count();
    if actual != schema.total_length() {
        #[cfg(feature = "logging")]
        warn!(
            "Record length mismatch for type {}. Expected {}, got {}",
            schema.name(),
            schema.total_length(),
            actual
        );
        return Err(ValidationError::LengthMismatch {
            expected: schema.total_length(),
            actual,
        });
    }

    for field in schema.fields() {
        let window = char_window(raw, field.offset(), field.end().min(actual));
        if !field.validate(window) {
            #[cfg(feature = "logging")]
            warn!(
                "Field {} validation failed for value: '{}'",
                field.name(),
                window
            );
            return Err(ValidationError::FieldInvalid {
                field: field.name().to_string(),
                value: window.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSchema;
    use crate::types::FieldType;

    fn schema() -> RecordSchema {
        RecordSchema::sequential("r")
            .field(
                FieldSchema::new("code", 2)
                    .unwrap()
                    .required(true)
                    .with_pattern("\\d{2}")
                    .unwrap(),
            )
            .field(FieldSchema::new("qty", 3).unwrap().with_type(FieldType::Integer))
            .field(FieldSchema::new("flag", 1).unwrap().with_type(FieldType::Boolean))
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_record() {
        assert!(validate_record(&schema(), "01 121"));
        assert!(validate_record(&schema(), "01   1"));
    }

    #[test]
    fn test_length_checked_first() {
        assert_eq!(
            validate_detailed(&schema(), "01 12"),
            Err(ValidationError::LengthMismatch {
                expected: 6,
                actual: 5
            })
        );
        assert!(!validate_record(&schema(), "01 121 "));
    }

    #[test]
    fn test_stops_at_first_bad_field() {
        assert_eq!(
            validate_detailed(&schema(), "AB xxZ"),
            Err(ValidationError::FieldInvalid {
                field: "code".into(),
                value: "AB".into()
            })
        );
        assert_eq!(
            validate_detailed(&schema(), "01 xxZ"),
            Err(ValidationError::FieldInvalid {
                field: "qty".into(),
                value: " xx".into()
            })
        );
    }

    #[test]
    fn test_required_blank_rejected() {
        assert!(!validate_record(&schema(), "  0121"));
    }
}
