//! Advisory findings reported alongside decode and encode results
//!
//! Nothing here changes control flow: a decode with diagnostics returns the
//! same record as one without.

use core::fmt;

/// A condition noticed while decoding or encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field window failed validation during lenient decode
    FieldInvalid {
        /// Field name.
        field: String,
        /// Extracted window.
        value: String,
    },

    /// The raw record ended inside this field's window
    ShortRecord {
        /// Field name.
        field: String,
        /// Characters needed to cover the window.
        expected: usize,
        /// Characters available.
        actual: usize,
    },

    /// An encoded value was wider than its field and lost characters
    Truncated {
        /// Field name.
        field: String,
        /// Declared field width.
        width: usize,
        /// Width of the value before truncation.
        actual: usize,
    },

    /// A field window reached past a declared total length and was cut
    Clipped {
        /// Field name.
        field: String,
        /// Declared total length.
        total_length: usize,
    },

    /// Whole-output trimming shortened the encoded line
    OutputTrimmed {
        /// Length before trimming.
        from: usize,
        /// Length after trimming.
        to: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FieldInvalid { field, value } => {
                write!(f, "Field {} failed validation. Value: '{}'", field, value)
            }
            Diagnostic::ShortRecord {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Record ends inside field {}: expected at least {} characters, got {}",
                field, expected, actual
            ),
            Diagnostic::Truncated {
                field,
                width,
                actual,
            } => write!(
                f,
                "Field {} truncated from {} to {} characters",
                field, actual, width
            ),
            Diagnostic::Clipped {
                field,
                total_length,
            } => write!(
                f,
                "Field {} extends past total length {}",
                field, total_length
            ),
            Diagnostic::OutputTrimmed { from, to } => {
                write!(f, "Encoded output trimmed from {} to {} characters", from, to)
            }
        }
    }
}

/// Collector that also forwards each finding to the log
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        #[cfg(feature = "logging")]
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
