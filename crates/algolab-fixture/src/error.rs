//! Error types for fixture parsing, writing and problem-set validation.
//!
//! Codec and adapter operations never produce these errors directly: they
//! return `Option`/[`ColumnError`] values and leave the severity decision to
//! the caller. Only the line parser and the problem-set runner raise.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::ScalarKind;

/// Column-level failure reported by a table adapter.
///
/// These are ordinary result values; the parser decides whether they abort
/// a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// A column with the same case-folded name already exists.
    #[error("duplicate column name: {name}")]
    Duplicate { name: String },

    /// No column is registered under this name.
    #[error("unknown column '{name}'")]
    Unknown { name: String },

    /// The text could not be parsed as the column's scalar kind.
    #[error("cannot parse {kind} value '{value}' for column '{column}'")]
    InvalidValue {
        column: String,
        value: String,
        kind: ScalarKind,
    },
}

/// What went wrong on a fixture line.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The input file could not be opened.
    #[error("cannot open input file: {0}")]
    Open(#[source] io::Error),

    /// The input could not be read.
    #[error("cannot read input: {0}")]
    Read(#[source] io::Error),

    /// A `-` record line appeared before the `data:` marker.
    #[error("invalid entry in the header section")]
    RecordInHeader,

    /// The data table refused to grow.
    #[error("cannot create a new table row")]
    NewRowRejected,

    /// A key/value line is missing its key or its value.
    #[error("key or value is empty")]
    EmptyKeyOrValue,

    /// A key/value line appeared in the data section before any `-` line.
    #[error("data section has no active row")]
    NoActiveRow,

    /// A header line was found but the parser has no header table.
    #[error("unexpected header entry '{key}'")]
    UnexpectedHeader { key: String },

    /// Applying a header value failed.
    #[error("cannot parse header key '{key}' with value '{value}': {source}")]
    Header {
        key: String,
        value: String,
        #[source]
        source: ColumnError,
    },

    /// Applying a data value failed.
    #[error("cannot parse data key '{key}' with value '{value}': {source}")]
    Data {
        key: String,
        value: String,
        #[source]
        source: ColumnError,
    },
}

/// A fixture parse failure with its source location.
#[derive(Debug)]
pub struct ParseError {
    /// Display name of the parsed input (usually the file path).
    pub file: String,
    /// 1-based line number, or 0 when the failure is not tied to a line.
    pub line: usize,
    /// The failure itself.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a parse error at the given location.
    pub fn new(file: impl Into<String>, line: usize, kind: ParseErrorKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }

    /// The column failure behind this error, if any.
    pub fn column_error(&self) -> Option<&ColumnError> {
        match &self.kind {
            ParseErrorKind::Header { source, .. } | ParseErrorKind::Data { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.file.is_empty() {
            write!(f, "{}:", self.file)?;
        }
        if self.line != 0 {
            write!(f, "{}: ", self.line)?;
        } else if !self.file.is_empty() {
            f.write_str(" ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Errors raised by the fixture framework.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Structural, value or I/O failure while parsing a fixture.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Column registration failed while setting up a table.
    #[error("invalid column setup: {0}")]
    Column(#[from] ColumnError),

    /// An output file could not be created.
    #[error("cannot open output file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The fixture belongs to a different problem set.
    #[error("wrong problem set: expected {expected}, found {found}. Check problem set number")]
    WrongProblemSet { expected: i32, found: i32 },

    /// Header and rows disagree.
    #[error("input file is corrupted: {message}")]
    CorruptedInput { message: String },

    /// The driver was built against a different framework version.
    #[error("incorrect fixture framework version: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Result type alias for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

impl FixtureError {
    /// Create a CorruptedInput error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::CorruptedInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_location_prefix() {
        let err = ParseError::new("data/intervals.in", 7, ParseErrorKind::EmptyKeyOrValue);
        assert_eq!(format!("{err}"), "data/intervals.in:7: key or value is empty");
    }

    #[test]
    fn test_parse_error_without_line() {
        let err = ParseError::new("missing.in", 0, ParseErrorKind::NoActiveRow);
        assert_eq!(format!("{err}"), "missing.in: data section has no active row");

        let err = ParseError::new("", 0, ParseErrorKind::RecordInHeader);
        assert_eq!(format!("{err}"), "invalid entry in the header section");
    }

    #[test]
    fn test_column_error_is_exposed() {
        let err = ParseError::new(
            "in",
            3,
            ParseErrorKind::Data {
                key: "foo".to_string(),
                value: "1".to_string(),
                source: ColumnError::Unknown {
                    name: "foo".to_string(),
                },
            },
        );
        assert!(matches!(
            err.column_error(),
            Some(ColumnError::Unknown { name }) if name == "foo"
        ));
        assert!(format!("{err}").contains("unknown column 'foo'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: FixtureError = io_err.into();
        assert!(matches!(err, FixtureError::Io(_)));
    }
}
