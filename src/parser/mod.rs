//! Parsing of producer output lines into records.
//!
//! The producer emits line-numbered grep output:
//!
//! ```text
//! ./src/main.c:42:    printf("hello\n");
//! ```
//!
//! Lines are parsed at the boundary; anything that is not a result line is
//! reported as a [`ParseSkip`] and dropped by the caller without surfacing it.

use crate::model::Record;
use thiserror::Error;

/// Field separator between name, line number and content.
pub const DELIMITER: char = ':';

/// Prefix of the notice grep prints instead of matches for binary files.
pub const BINARY_SENTINEL: &str = "Binary file";

/// Prefix the producer puts on every path because it searches from `.`.
const CURRENT_DIR_PREFIX: &str = "./";

/// Reason a line was not turned into a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseSkip {
    /// "Binary file ... matches" notice.
    #[error("binary file notice")]
    BinaryFile,

    /// No delimiter at all.
    #[error("no field delimiter")]
    NoDelimiter,

    /// Only one delimiter, so there is no content field.
    #[error("missing line number field")]
    MissingLineNumber,
}

/// Remove one trailing line terminator (`\n` or `\r\n`).
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse one producer line (terminator already stripped).
///
/// The first delimiter ends the name, the second ends the line number, and
/// everything after the second delimiter, minus leading whitespace, is the
/// content. Content may itself contain delimiters.
///
/// # Errors
///
/// Returns the [`ParseSkip`] reason for sentinel and malformed lines.
pub fn parse_line(line: &str) -> Result<Record, ParseSkip> {
    if line.starts_with(BINARY_SENTINEL) {
        return Err(ParseSkip::BinaryFile);
    }

    let (name, rest) = line.split_once(DELIMITER).ok_or(ParseSkip::NoDelimiter)?;
    let (number, content) = rest
        .split_once(DELIMITER)
        .ok_or(ParseSkip::MissingLineNumber)?;

    let name = name.strip_prefix(CURRENT_DIR_PREFIX).unwrap_or(name);

    Ok(Record::new(name, number, content.trim_start()))
}
