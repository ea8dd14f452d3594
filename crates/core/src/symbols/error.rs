use std::num::ParseIntError;

use thiserror::Error;

/// Failure to parse a single line of nm output.
///
/// Every variant carries the original line so a change in the tool's output
/// format can be diagnosed from the error alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than three whitespace-separated tokens.
    #[error("invalid symbol line: {line:?}")]
    MalformedLine { line: String },

    /// No single-letter type token at index 1 or index 2.
    #[error("unable to find symbol type in line: {line:?}")]
    UnrecognizedLayout { line: String },

    #[error("invalid address {field:?} in line: {line:?}")]
    InvalidAddress {
        field: String,
        line: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid size {field:?} in line: {line:?}")]
    InvalidSize {
        field: String,
        line: String,
        #[source]
        source: ParseIntError,
    },

    #[error("negative size {field:?} in line: {line:?}")]
    NegativeSize { field: String, line: String },
}

impl ParseError {
    /// The offending line as it was read from the tool.
    pub fn line(&self) -> &str {
        match self {
            ParseError::MalformedLine { line }
            | ParseError::UnrecognizedLayout { line }
            | ParseError::InvalidAddress { line, .. }
            | ParseError::InvalidSize { line, .. }
            | ParseError::NegativeSize { line, .. } => line,
        }
    }
}

/// Failure of a whole symbol-table batch.
///
/// A batch never yields a partial symbol list: one bad line or a read error
/// aborts it.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("failed to parse symbol table line {line_number}: {source}")]
    MalformedLine {
        line_number: usize,
        #[source]
        source: ParseError,
    },

    #[error("failed to read symbol table: {0}")]
    Stream(#[from] std::io::Error),
}
