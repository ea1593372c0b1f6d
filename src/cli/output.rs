//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use serde::Serialize;

use gleaner::GleanerError;

/// Writes the record as indented JSON to stdout.
///
/// # Errors
///
/// Returns [`GleanerError::Io`] when serialization or the write fails.
pub fn write_json<T: Serialize>(record: &T) -> Result<(), GleanerError> {
    let mut stdout = io::stdout().lock();
    write_json_to(&mut stdout, record)
}

/// Writes the record as indented JSON to the given writer.
///
/// # Errors
///
/// Returns [`GleanerError::Io`] when serialization or the write fails.
pub fn write_json_to<W: Write, T: Serialize>(
    writer: &mut W,
    record: &T,
) -> Result<(), GleanerError> {
    let serialized = serde_json::to_string_pretty(record).map_err(|error| GleanerError::Io {
        message: format!("failed to serialize record: {error}"),
    })?;
    writeln!(writer, "{serialized}").map_err(|error| GleanerError::Io {
        message: error.to_string(),
    })
}

/// Writes a diagnostic line to stderr when debug output is enabled.
pub fn write_diagnostic(debug: bool, message: &str) {
    if !debug {
        return;
    }
    let mut stderr = io::stderr().lock();
    let _ignored = writeln!(stderr, "{message}");
}

#[cfg(test)]
mod tests {
    use super::write_json_to;

    #[test]
    fn writes_indented_json_with_a_trailing_newline() {
        let record = serde_json::json!({ "key": "TEST-1", "comments": ["one"] });
        let mut buffer = Vec::new();

        write_json_to(&mut buffer, &record).expect("write should succeed");

        let text = String::from_utf8(buffer).expect("output should be UTF-8");
        assert!(text.starts_with('{'), "output should be a JSON object");
        assert!(text.contains("  \"key\""), "output should be indented");
        assert!(text.ends_with('\n'), "output should end with a newline");
    }
}
