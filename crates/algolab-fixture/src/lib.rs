//! Column adapters and a YAML-subset fixture format for grading algorithm
//! solutions.
//!
//! A fixture is a small text file with a header block and a list of
//! problems. Struct fields are bound to named, typed columns through
//! [`FieldAdapter`]s; a [`Table`] exposes those columns by row and name to
//! the [`FixtureParser`] and to the writer, so no reflection or derive is
//! needed.
//!
//! # Features
//!
//! - Scalar codec for integers, booleans, quoted strings and integer
//!   sequences, with overflow-checked integer parsing
//! - Fixed one-row tables for headers and growable tables for problem lists
//! - Strict or lenient parsing with file/line error locations
//! - Sparse or full output that re-parses to the same records
//! - A problem-set runner that validates the fixture, times the solver and
//!   collects mistakes
//!
//! # Example
//!
//! ```
//! use algolab_fixture::{
//!     FixtureParser, ParseOptions, RecordAdapter, TableAdapter, field,
//! };
//!
//! #[derive(Default)]
//! struct Header {
//!     problems: i32,
//! }
//!
//! #[derive(Default)]
//! struct Job {
//!     id: i32,
//!     left: Vec<i32>,
//! }
//!
//! let text = "problems: 1\ndata:\n - problem: 1\n   left: [1,3,0]\n";
//!
//! let mut header = Header::default();
//! let mut jobs = Vec::new();
//! {
//!     let mut header_table = RecordAdapter::new(&mut header);
//!     header_table.add_named_column("problems", field!(Header, problems, -1))?;
//!     let mut job_table = TableAdapter::new(&mut jobs);
//!     job_table.add_named_column("problem", field!(Job, id, -1))?;
//!     job_table.add_named_column("left", field!(Job, left))?;
//!
//!     FixtureParser::new(&mut header_table, &mut job_table).parse_reader(
//!         "inline",
//!         text.as_bytes(),
//!         ParseOptions::new().strict(),
//!     )?;
//! }
//! assert_eq!(header.problems, 1);
//! assert_eq!(jobs[0].left, vec![1, 3, 0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
mod error;
mod field;
mod options;
pub mod parser;
pub mod problem_set;
mod segment;
mod table;
pub mod writer;

// Re-export error types
pub use error::{ColumnError, FixtureError, ParseError, ParseErrorKind, Result};

// Re-export core types
pub use codec::{Scalar, ScalarKind};
pub use field::{Binding, FieldAdapter, IntoFieldAdapter};
pub use options::{ParseOptions, WriteOptions};
pub use segment::StringSegment;
pub use table::{Columns, RecordAdapter, Table, TableAdapter};

// Re-export parser and writer functionality
pub use parser::{FixtureParser, LineHandler, LineParser, ParseOutcome, Section};
pub use writer::{FixtureWriter, write_table, write_table_to_file};

// Re-export runner functionality
pub use problem_set::{
    BasicProblem, Mistake, ProblemRecord, ProblemSet, ProblemSetHeader, ProblemSetReport,
    add_default_problem_columns, add_default_problem_columns_for_output,
    add_default_problem_set_columns, preprocess_problem_set, process_results,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag of the fixture framework. Drivers declare the version they
/// were written against and check it with [`ensure_framework_version`].
pub const FRAMEWORK_VERSION: u32 = 110;

/// Fail with [`FixtureError::VersionMismatch`] unless `expected` matches
/// [`FRAMEWORK_VERSION`].
pub fn ensure_framework_version(expected: u32) -> Result<()> {
    if expected == FRAMEWORK_VERSION {
        Ok(())
    } else {
        Err(FixtureError::VersionMismatch {
            expected,
            found: FRAMEWORK_VERSION,
        })
    }
}
