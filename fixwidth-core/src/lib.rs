//! # Fixwidth Core
//!
//! Schema-driven codec for fixed-width text records.
//!
//! A record type is an ordered list of fields, each a character window with a
//! declared width and type. Raw lines decode into ordered name/value
//! [`Record`]s, values encode back into padded lines, and a strict gate
//! validates raw lines against their schema.
//!
//! ## Modules
//!
//! - `constants`: Padding, boolean tokens and defaults
//! - `types`: Field types and decoded values
//! - `field`: Field schema and per-field validate/convert
//! - `schema`: Record and source schemas (sequential and positional)
//! - `record`: Decoded record container
//! - `decoder`: Lenient decoding
//! - `encoder`: Padding/truncating encoder
//! - `validator`: Strict validation gate
//! - `diagnostics`: Advisory findings from decode and encode
//! - `config`: YAML schema documents
//! - `registry`: Loaded sources and record types
//! - `parser`: Facade over a registry, with batch and type-detecting decode
//! - `layout`: Statically declared positional layouts
//!
//! ## Example
//!
//! ```
//! use fixwidth_core::{FieldSchema, FieldType, RecordSchema, Value};
//!
//! let schema = RecordSchema::sequential("person")
//!     .field(FieldSchema::new("id", 3).unwrap().with_type(FieldType::Integer))
//!     .field(FieldSchema::new("name", 6).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let record = fixwidth_core::decode_record(&schema, "042Ann   ").unwrap();
//! assert_eq!(record.get("id"), Some(&Value::Integer(42)));
//! assert_eq!(fixwidth_core::encode_record(&schema, &record), "42 Ann   ");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod decoder;
pub mod diagnostics;
pub mod encoder;
pub mod error;
pub mod field;
pub mod layout;
pub mod parser;
pub mod record;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use config::SchemaDocument;
pub use decoder::{decode_record, decode_with_diagnostics};
pub use diagnostics::Diagnostic;
pub use encoder::{encode_record, encode_with_diagnostics, FieldSource};
pub use error::{SchemaError, ValidationError};
pub use field::FieldSchema;
pub use layout::{FieldDescriptor, FixedLayout, LayoutRegistry};
pub use parser::{PrefixDetector, RecordParser, RecordTypeDetector};
pub use record::Record;
pub use registry::SchemaRegistry;
pub use schema::{Layout, OverlapPolicy, RecordSchema, SourceSchema};
pub use types::{FieldType, Value};
pub use validator::{validate_detailed, validate_record};

/// Result type alias for schema construction and loading
pub type Result<T> = core::result::Result<T, SchemaError>;
