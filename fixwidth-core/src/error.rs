//! Error types for schema construction and strict validation

/// Errors raised while building or loading schemas
///
/// Decoding never produces these; a schema that fails to build never reaches
/// the codec.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Field declared without a name
    #[error("Field name must not be empty")]
    EmptyFieldName,

    /// Field declared with a zero-width window
    #[error("Field {field} has zero length")]
    ZeroLength {
        /// The offending field.
        field: String,
    },

    /// Positional field declared at column 0
    #[error("Field {field} has invalid position {position} (positions start at 1)")]
    InvalidPosition {
        /// The offending field.
        field: String,
        /// The declared position.
        position: usize,
    },

    /// Positional record mixing positioned and unpositioned fields
    #[error("Field {field} has no position in a positional record")]
    MissingPosition {
        /// The offending field.
        field: String,
    },

    /// Validation pattern failed to compile
    #[error("Invalid pattern for field {field}: {message}")]
    InvalidPattern {
        /// The offending field.
        field: String,
        /// Compiler message from the regex engine.
        message: String,
    },

    /// Two positional fields share characters while overlap is rejected
    #[error("Fields {first} and {second} overlap")]
    OverlappingFields {
        /// The earlier field.
        first: String,
        /// The later field.
        second: String,
    },

    /// Record type declared without a name
    #[error("Record type name must not be empty")]
    EmptyRecordTypeName,

    /// Source declared without a name
    #[error("Source name must not be empty")]
    EmptySourceName,

    /// Record type declared twice within one source
    #[error("Record type {record_type} declared twice in source {source_name}")]
    DuplicateRecordType {
        /// The source holding both declarations.
        source_name: String,
        /// The repeated record type.
        record_type: String,
    },

    /// Source declared twice within one registry
    #[error("Source {0} declared twice")]
    DuplicateSource(String),

    /// Numeric setting that could not be read as an unsigned integer
    #[error("Invalid numeric value for {key}: {value}")]
    InvalidNumber {
        /// Setting name.
        key: String,
        /// Text that failed to parse.
        value: String,
    },

    /// Schema document is not valid YAML or does not match the expected tree
    #[error("YAML error: {0}")]
    Yaml(String),

    /// IO error while reading a schema document
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(err: serde_yaml::Error) -> Self {
        SchemaError::Yaml(err.to_string())
    }
}

/// Reasons a raw record fails the strict validation gate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Raw length differs from the schema's total length
    #[error("Record length mismatch: expected {expected} characters, got {actual}")]
    LengthMismatch {
        /// Total length declared by the schema.
        expected: usize,
        /// Length of the raw record.
        actual: usize,
    },

    /// A field window failed its required/pattern/type check
    #[error("Field {field} failed validation: '{value}'")]
    FieldInvalid {
        /// The first failing field.
        field: String,
        /// The extracted window.
        value: String,
    },

    /// No schema is registered under this source/record-type pair
    #[error("Unknown record type {record_type} for source {source_name}")]
    UnknownRecordType {
        /// Requested source.
        source_name: String,
        /// Requested record type.
        record_type: String,
    },
}
