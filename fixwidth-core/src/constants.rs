//! Constants shared by the codec

/// Character used to pre-fill encode buffers and pad short values
pub const PAD_CHAR: char = ' ';

/// Tokens accepted by Boolean validation (compared case-insensitively after trim)
pub const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "yes", "no", "1", "0"];

/// Tokens that convert to `true`; any other non-blank text converts to `false`
pub const BOOLEAN_TRUE_TOKENS: [&str; 3] = ["true", "yes", "1"];

/// Whether extracted values are trimmed before conversion unless a field says otherwise
pub const DEFAULT_TRIM: bool = true;

/// Whether encoded output is trimmed as a whole unless a schema says otherwise
///
/// Trimming the whole line can make it shorter than the schema's total length,
/// so it stays opt-in.
pub const DEFAULT_TRIM_OUTPUT: bool = false;

/// Positional schemas number their columns from 1
pub const FIRST_POSITION: usize = 1;
