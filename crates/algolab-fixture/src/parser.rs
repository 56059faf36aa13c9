//! Line-oriented fixture parser.
//!
//! [`LineParser`] drives any [`LineHandler`] over an input, one physical line
//! at a time. It owns the line counter, the source name and the error policy:
//!
//! - strict mode returns the first failure as a [`ParseError`] carrying the
//!   source name and the 1-based line number;
//! - lenient mode stops at the first failure, clears the OK flag and keeps
//!   the error for inspection, without returning it.
//!
//! [`FixtureParser`] is the YAML-subset handler:
//!
//! ```text
//! problem_set_number: 1005230     <- header section, applied to row 0
//! problems: 3
//! data:                           <- switches to the data section
//!  - problem: 1                   <- `-` appends a row, rest is a key/value
//!    left: [1,3,0,5,3,5,6,8]      <- applied to the last appended row
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, debug_span, warn};

use crate::error::{ParseError, ParseErrorKind};
use crate::options::ParseOptions;
use crate::segment::StringSegment;
use crate::table::Table;

/// Marker line that ends the header section.
pub const DATA_MARKER: &str = "data:";

/// Per-line callbacks invoked by [`LineParser`].
pub trait LineHandler {
    /// Called once before the first line.
    fn pre_parse(&mut self) -> Result<(), ParseErrorKind> {
        Ok(())
    }

    /// Called for every physical line, without its line terminator.
    fn parse_line(&mut self, line: StringSegment<'_>) -> Result<(), ParseErrorKind>;

    /// Called once after the last line if nothing failed.
    fn post_parse(&mut self) -> Result<(), ParseErrorKind> {
        Ok(())
    }
}

/// Result of a parse that did not raise.
#[derive(Debug)]
pub struct ParseOutcome {
    /// Number of lines read.
    pub lines: usize,
    /// The failure that stopped a lenient parse.
    pub error: Option<ParseError>,
}

impl ParseOutcome {
    /// Whether the whole input was consumed without failure.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The failure captured by a lenient parse.
    pub fn last_error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }
}

/// Drives a [`LineHandler`] over a file or reader.
#[derive(Debug)]
pub struct LineParser {
    options: ParseOptions,
    source_name: String,
    line_number: usize,
    failed: bool,
}

impl LineParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            source_name: String::new(),
            line_number: 0,
            failed: false,
        }
    }

    /// Whether the last parse completed without failure.
    pub fn is_ok(&self) -> bool {
        !self.failed
    }

    /// Line number of the last line read (1-based, 0 before the first line).
    pub fn current_line(&self) -> usize {
        self.line_number
    }

    /// Display name of the last parsed input.
    pub fn current_file(&self) -> &str {
        &self.source_name
    }

    /// Parse the file at `path`.
    ///
    /// A file that cannot be opened is a parse failure at line 0, subject to
    /// the same strict/lenient policy as any other failure.
    pub fn parse_file<H: LineHandler>(
        &mut self,
        path: &Path,
        handler: &mut H,
    ) -> Result<ParseOutcome, ParseError> {
        let name = path.display().to_string();
        match File::open(path) {
            Ok(file) => self.parse_reader(&name, BufReader::new(file), handler),
            Err(source) => {
                self.reset(&name);
                self.fail(ParseErrorKind::Open(source))
            }
        }
    }

    /// Parse from any buffered reader; `name` is used in error messages.
    pub fn parse_reader<R: BufRead, H: LineHandler>(
        &mut self,
        name: &str,
        reader: R,
        handler: &mut H,
    ) -> Result<ParseOutcome, ParseError> {
        self.reset(name);
        let span = debug_span!("parse", file = %name);
        let _guard = span.enter();
        debug!(strict = self.options.strict, "parsing fixture");

        if let Err(kind) = handler.pre_parse() {
            return self.fail(kind);
        }

        for line in reader.lines() {
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(source) => return self.fail(ParseErrorKind::Read(source)),
            };
            if let Err(kind) = handler.parse_line(StringSegment::new(&line)) {
                return self.fail(kind);
            }
        }

        if let Err(kind) = handler.post_parse() {
            return self.fail(kind);
        }

        debug!(lines = self.line_number, "fixture parsed");
        Ok(ParseOutcome {
            lines: self.line_number,
            error: None,
        })
    }

    fn reset(&mut self, name: &str) {
        self.source_name = name.to_string();
        self.line_number = 0;
        self.failed = false;
    }

    fn fail(&mut self, kind: ParseErrorKind) -> Result<ParseOutcome, ParseError> {
        self.failed = true;
        let error = ParseError::new(self.source_name.clone(), self.line_number, kind);
        warn!(error = %error, strict = self.options.strict, "fixture parse failed");
        if self.options.strict {
            Err(error)
        } else {
            Ok(ParseOutcome {
                lines: self.line_number,
                error: Some(error),
            })
        }
    }
}

/// Which part of the fixture the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Before the `data:` marker; lines go to the header table.
    #[default]
    Header,
    /// After the `data:` marker; lines go to the data table.
    Data,
}

/// YAML-subset handler over a header table and a growable data table.
pub struct FixtureParser<'a> {
    header: Option<&'a mut dyn Table>,
    table: &'a mut dyn Table,
    section: Section,
}

impl<'a> FixtureParser<'a> {
    /// Create a parser over a fixed header table and a growable data table.
    ///
    /// # Panics
    ///
    /// Panics if `header` has no row or `table` is fixed-size.
    pub fn new(header: &'a mut dyn Table, table: &'a mut dyn Table) -> Self {
        assert!(header.row_count() > 0, "header table must have a row");
        assert!(!table.is_fixed_size(), "data table must be growable");
        Self {
            header: Some(header),
            table,
            section: Section::Header,
        }
    }

    /// Create a parser with no header table; any header entry is an error.
    ///
    /// # Panics
    ///
    /// Panics if `table` is fixed-size.
    pub fn without_header(table: &'a mut dyn Table) -> Self {
        assert!(!table.is_fixed_size(), "data table must be growable");
        Self {
            header: None,
            table,
            section: Section::Header,
        }
    }

    /// The section the parser is currently in.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Parse `path` with the given options.
    pub fn parse_file(
        &mut self,
        path: &Path,
        options: ParseOptions,
    ) -> Result<ParseOutcome, ParseError> {
        LineParser::new(options).parse_file(path, self)
    }

    /// Parse from a reader with the given options.
    pub fn parse_reader<R: BufRead>(
        &mut self,
        name: &str,
        reader: R,
        options: ParseOptions,
    ) -> Result<ParseOutcome, ParseError> {
        LineParser::new(options).parse_reader(name, reader, self)
    }

    fn apply(
        &mut self,
        key: StringSegment<'_>,
        value: StringSegment<'_>,
    ) -> Result<(), ParseErrorKind> {
        match self.section {
            Section::Header => {
                let Some(header) = self.header.as_deref_mut() else {
                    return Err(ParseErrorKind::UnexpectedHeader {
                        key: key.to_string(),
                    });
                };
                header
                    .set_value_by_name(0, key.as_str(), value)
                    .map_err(|source| ParseErrorKind::Header {
                        key: key.to_string(),
                        value: value.to_string(),
                        source,
                    })
            }
            Section::Data => {
                let rows = self.table.row_count();
                if rows == 0 {
                    return Err(ParseErrorKind::NoActiveRow);
                }
                self.table
                    .set_value_by_name(rows - 1, key.as_str(), value)
                    .map_err(|source| ParseErrorKind::Data {
                        key: key.to_string(),
                        value: value.to_string(),
                        source,
                    })
            }
        }
    }
}

impl LineHandler for FixtureParser<'_> {
    fn pre_parse(&mut self) -> Result<(), ParseErrorKind> {
        self.section = Section::Header;
        Ok(())
    }

    fn parse_line(&mut self, mut line: StringSegment<'_>) -> Result<(), ParseErrorKind> {
        line.trim();
        let Some(first) = line.first_char() else {
            return Ok(());
        };
        if first == '#' {
            return Ok(());
        }
        if line.matches(DATA_MARKER, false) {
            self.section = Section::Data;
            return Ok(());
        }

        if first == '-' {
            if self.section == Section::Header {
                return Err(ParseErrorKind::RecordInHeader);
            }
            self.table.new_row().ok_or(ParseErrorKind::NewRowRejected)?;
            line.remove_prefix(1);
            line.trim();
            if line.is_empty() {
                return Ok(());
            }
        }

        let mut value = line;
        let mut key = value.split(':').unwrap_or_default();
        key.trim();
        value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(ParseErrorKind::EmptyKeyOrValue);
        }

        self.apply(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;
    use crate::table::{RecordAdapter, TableAdapter};

    #[derive(Debug, Default)]
    struct Header {
        id: i32,
        problems: i32,
    }

    #[derive(Debug, Default)]
    struct Row {
        id: i32,
        answer: i32,
    }

    type Parsed = (Header, Vec<Row>, Result<ParseOutcome, ParseError>);

    fn parse(text: &str, options: ParseOptions) -> Parsed {
        let mut header = Header::default();
        let mut rows = Vec::new();
        let result = {
            let mut header_table = RecordAdapter::new(&mut header);
            header_table
                .add_named_column("problem_set_number", field!(Header, id, -1))
                .unwrap();
            header_table
                .add_named_column("problems", field!(Header, problems, -1))
                .unwrap();
            let mut row_table = TableAdapter::new(&mut rows);
            row_table.add_named_column("problem", field!(Row, id, -1)).unwrap();
            row_table
                .add_named_column("correct_answer", field!(Row, answer, -1))
                .unwrap();
            FixtureParser::new(&mut header_table, &mut row_table).parse_reader(
                "test.in",
                text.as_bytes(),
                options,
            )
        };
        (header, rows, result)
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = "# header\n\nproblems: 2\n   \ndata:\n# rows\n - problem: 1\n - problem: 2\n";
        let (header, rows, result) = parse(text, ParseOptions::new().strict());
        let outcome = result.expect("parse");
        assert!(outcome.is_ok());
        assert_eq!(outcome.lines, 8);
        assert_eq!(header.problems, 2);
        assert_eq!(header.id, 0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].answer, -1);
    }

    #[test]
    fn test_bare_dash_starts_empty_row() {
        let text = "data:\n -\n   problem: 4\n";
        let (_, rows, result) = parse(text, ParseOptions::new().strict());
        assert!(result.expect("parse").is_ok());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 4);
    }

    #[test]
    fn test_data_marker_is_case_insensitive() {
        let text = "DATA:\n - problem: 1\n";
        let (_, rows, result) = parse(text, ParseOptions::new().strict());
        assert!(result.is_ok());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_record_in_header_is_structural_error() {
        let text = "problems: 1\n - problem: 1\n";
        let (_, _, result) = parse(text, ParseOptions::new().strict());
        let err = result.unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ParseErrorKind::RecordInHeader));
        assert_eq!(format!("{err}"), "test.in:2: invalid entry in the header section");
    }

    #[test]
    fn test_data_line_without_row() {
        let text = "data:\n problem: 1\n";
        let (_, _, result) = parse(text, ParseOptions::new().strict());
        let err = result.unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::NoActiveRow));
    }

    #[test]
    fn test_empty_key_or_value() {
        for text in ["problems:\n", ": 3\n", "problems 3\n"] {
            let (_, _, result) = parse(text, ParseOptions::new().strict());
            let err = result.unwrap_err();
            assert!(matches!(err.kind, ParseErrorKind::EmptyKeyOrValue), "{text:?}");
        }
    }

    #[test]
    fn test_lenient_mode_stops_without_raising() {
        let text = "problems: 1\ndata:\n - problem: 1\n   foo: 1\n - problem: 2\n";
        let (_, rows, result) = parse(text, ParseOptions::new());
        let outcome = result.expect("lenient parse does not raise");
        assert!(!outcome.is_ok());
        assert_eq!(outcome.lines, 4);
        let err = outcome.last_error().expect("captured error");
        assert!(format!("{err}").contains("foo"));
        assert_eq!(err.line, 4);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_line_parser_tracks_state() {
        let mut rows: Vec<Row> = Vec::new();
        let mut table = TableAdapter::new(&mut rows);
        table.add_named_column("problem", field!(Row, id)).unwrap();
        let mut handler = FixtureParser::without_header(&mut table);
        let mut parser = LineParser::new(ParseOptions::default());

        let outcome = parser
            .parse_reader("mem", "problems: 1\n".as_bytes(), &mut handler)
            .expect("lenient");
        assert!(!outcome.is_ok());
        assert!(!parser.is_ok());
        assert_eq!(parser.current_line(), 1);
        assert_eq!(parser.current_file(), "mem");
        assert!(matches!(
            outcome.error.map(|e| e.kind),
            Some(ParseErrorKind::UnexpectedHeader { .. })
        ));

        let outcome = parser
            .parse_reader("mem", "data:\n- problem: 3\n".as_bytes(), &mut handler)
            .expect("lenient");
        assert!(outcome.is_ok());
        assert!(parser.is_ok());
        assert_eq!(handler.section(), Section::Data);
    }
}
