//! Library entry for fixwidth-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

/// Parse a `PREFIX=TYPE` detection rule
///
/// The prefix may be empty (matches every line); the record type may not.
pub fn parse_prefix_rule(rule: &str) -> Result<(String, String), String> {
    let (prefix, record_type) = rule
        .split_once('=')
        .ok_or_else(|| format!("invalid rule '{}': expected PREFIX=TYPE", rule))?;

    if record_type.trim().is_empty() {
        return Err(format!("invalid rule '{}': record type is empty", rule));
    }

    Ok((prefix.to_string(), record_type.trim().to_string()))
}
