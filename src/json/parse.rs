//! Purpose: Map serde_json decode failures onto the crate error taxonomy.
//! Exports: `ParseFailureCategory`, `categorize_error`, `classify`, `byte_offset`.
//! Role: Parser boundary; the only place that inspects serde_json error shapes.
//! Invariants: Classification is ordered, most specific first, one kind per failure.
//! Invariants: Syntax beats truncation, truncation beats empty, data errors come last.
//! Notes: Offsets are zero-based byte counts derived from line/column against the body.

use crate::core::error::{Error, ErrorKind};
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Truncated,
    Empty,
    Data,
    Io,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DataFailureCategory {
    UnknownField(String),
    TypeMismatch,
    Other,
}

pub(crate) fn categorize_error(err: &serde_json::Error, body: &[u8]) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof if is_blank(body) => ParseFailureCategory::Empty,
        Category::Eof => ParseFailureCategory::Truncated,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn categorize_data_message(message: &str) -> DataFailureCategory {
    if let Some(rest) = message.strip_prefix("unknown field `") {
        let name = rest.split('`').next().unwrap_or_default();
        return DataFailureCategory::UnknownField(name.to_string());
    }
    const TYPE_PREFIXES: [&str; 3] = ["invalid type: ", "invalid value: ", "invalid length "];
    if TYPE_PREFIXES.iter().any(|prefix| message.starts_with(prefix)) {
        return DataFailureCategory::TypeMismatch;
    }
    DataFailureCategory::Other
}

/// Build the caller-facing error for a failed decode.
///
/// `field` is the path to the value being decoded when the error fired, and
/// `first_unknown` the first ignored key seen before it (only when unknown keys
/// are disallowed).
pub(crate) fn classify(
    err: serde_json::Error,
    field: Option<String>,
    body: &[u8],
    first_unknown: Option<String>,
) -> Error {
    let offset = byte_offset(body, err.line(), err.column());
    match categorize_error(&err, body) {
        ParseFailureCategory::Syntax => Error::new(ErrorKind::MalformedSyntax).with_offset(offset),
        ParseFailureCategory::Truncated => Error::new(ErrorKind::MalformedSyntax),
        ParseFailureCategory::Empty => Error::empty_body(),
        ParseFailureCategory::Io => Error::new(ErrorKind::Other).with_source(err),
        ParseFailureCategory::Data => {
            if let Some(name) = first_unknown {
                return Error::unknown_field(name);
            }
            let message = bare_message(&err);
            match categorize_data_message(&message) {
                DataFailureCategory::UnknownField(name) => Error::unknown_field(name),
                DataFailureCategory::TypeMismatch => {
                    let mismatch = Error::new(ErrorKind::TypeMismatch).with_offset(offset);
                    match field {
                        Some(field) => mismatch.with_field(field),
                        None => mismatch,
                    }
                }
                // Missing fields, unknown variants and target-raised errors pass through.
                DataFailureCategory::Other => Error::new(ErrorKind::Other)
                    .with_message(message)
                    .with_source(err),
            }
        }
    }
}

/// Convert serde_json's 1-based line and column into a byte offset into `body`.
pub(crate) fn byte_offset(body: &[u8], line: usize, column: usize) -> u64 {
    if line == 0 {
        return 0;
    }
    let line_start: usize = body
        .split(|byte| *byte == b'\n')
        .take(line - 1)
        .map(|segment| segment.len() + 1)
        .sum();
    (line_start + column).min(body.len()) as u64
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
}

fn bare_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    if err.line() == 0 {
        return full;
    }
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    if let Some(message) = full.strip_suffix(&suffix) {
        return message.to_string();
    }
    full
}
