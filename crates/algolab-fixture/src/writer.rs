//! Fixture writer.
//!
//! Serializes a header table and a data table back into the fixture format
//! read by [`crate::parser::FixtureParser`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{FixtureError, Result};
use crate::options::WriteOptions;
use crate::parser::DATA_MARKER;
use crate::table::Table;

/// Writes header and data tables in the fixture format.
pub struct FixtureWriter<W: Write> {
    writer: BufWriter<W>,
    options: WriteOptions,
}

impl<W: Write> FixtureWriter<W> {
    /// Create a writer with default options (sparse output).
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, WriteOptions::default())
    }

    /// Create a writer with options.
    pub fn with_options(writer: W, options: WriteOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Write the comment block, the header record, the `data:` marker and
    /// every data row, then flush.
    pub fn write_table(mut self, header: Option<&dyn Table>, table: &dyn Table) -> Result<()> {
        if let Some(comments) = &self.options.comments {
            self.writer.write_all(comments.as_bytes())?;
        }
        if let Some(header) = header {
            self.write_header(header)?;
        }

        write!(self.writer, "\n{DATA_MARKER}\n")?;
        for row in 0..table.row_count() {
            self.write_row(table, row)?;
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self, header: &dyn Table) -> Result<()> {
        for col in 0..header.column_count() {
            if self.emits(header, 0, col) {
                writeln!(
                    self.writer,
                    "{}: {}",
                    header.column_name(col),
                    header.value(0, col)
                )?;
            }
        }
        Ok(())
    }

    /// Write one row as a list item: ` - key: value` for the first emitted
    /// column and `   key: value` for the rest. A row with nothing to emit
    /// is written as a bare ` -` so the row count survives a re-parse.
    fn write_row(&mut self, table: &dyn Table, row: usize) -> Result<()> {
        self.writer.write_all(b"\n")?;
        let mut first = true;
        for col in 0..table.column_count() {
            if !self.emits(table, row, col) {
                continue;
            }
            let lead = if first { " - " } else { "   " };
            first = false;
            writeln!(
                self.writer,
                "{lead}{}: {}",
                table.column_name(col),
                table.value(row, col)
            )?;
        }
        if first {
            self.writer.write_all(b" -\n")?;
        }
        Ok(())
    }

    fn emits(&self, table: &dyn Table, row: usize, col: usize) -> bool {
        self.options.write_default_values || !table.equals_default_value(row, col)
    }
}

/// Write `header` and `table` to `out`.
pub fn write_table<W: Write>(
    out: W,
    header: Option<&dyn Table>,
    table: &dyn Table,
    options: &WriteOptions,
) -> Result<()> {
    FixtureWriter::with_options(out, options.clone()).write_table(header, table)
}

/// Create (or truncate) the file at `path` and write the tables into it.
pub fn write_table_to_file(
    path: &Path,
    header: Option<&dyn Table>,
    table: &dyn Table,
    options: &WriteOptions,
) -> Result<()> {
    let file = File::create(path).map_err(|source| FixtureError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(file, header, table, options)?;
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        full = options.write_default_values,
        "fixture written"
    );
    Ok(())
}
