//! Table adapters: row/column access over caller-owned records.
//!
//! [`RecordAdapter`] views a single record as a fixed one-row table (used for
//! problem-set headers). [`TableAdapter`] views a `Vec<T>` as a growable table
//! (used for problem lists). Both borrow the storage mutably and never own it.
//!
//! Columns are registered once, before parsing starts. Names are matched
//! case-insensitively.

use std::collections::HashMap;

use crate::error::ColumnError;
use crate::field::FieldAdapter;
use crate::segment::StringSegment;

/// Uniform row/column access used by the parser and the writer.
pub trait Table {
    /// Append a default-initialized row and return its index.
    ///
    /// Fixed tables always return `None`.
    fn new_row(&mut self) -> Option<usize>;

    /// Reset every column of `row` to its default.
    fn set_default_values(&mut self, row: usize);

    /// Whether the table has exactly one, permanent row.
    fn is_fixed_size(&self) -> bool;

    /// Registered name of column `col`.
    fn column_name(&self, col: usize) -> &str;

    /// Encoded value at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    fn value(&self, row: usize, col: usize) -> String;

    /// Parse `value` into (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    fn set_value(
        &mut self,
        row: usize,
        col: usize,
        value: StringSegment<'_>,
    ) -> Result<(), ColumnError>;

    /// Index of the column registered as `key` (case-insensitive).
    fn column_by_name(&self, key: &str) -> Option<usize>;

    /// Whether (`row`, `col`) holds the column default.
    fn equals_default_value(&self, row: usize, col: usize) -> bool;

    /// Number of registered columns.
    fn column_count(&self) -> usize;

    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Encoded value of column `key` in `row`.
    fn value_by_name(&self, row: usize, key: &str) -> Result<String, ColumnError> {
        let col = self
            .column_by_name(key)
            .ok_or_else(|| ColumnError::Unknown {
                name: key.to_string(),
            })?;
        Ok(self.value(row, col))
    }

    /// Parse `value` into column `key` of `row`.
    fn set_value_by_name(
        &mut self,
        row: usize,
        key: &str,
        value: StringSegment<'_>,
    ) -> Result<(), ColumnError> {
        let col = self
            .column_by_name(key)
            .ok_or_else(|| ColumnError::Unknown {
                name: key.to_string(),
            })?;
        self.set_value(row, col, value)
    }
}

struct ColumnSpec<T> {
    name: String,
    adapter: FieldAdapter<T>,
}

/// Ordered column list plus a case-folded name index.
pub struct Columns<T> {
    specs: Vec<ColumnSpec<T>>,
    name_to_index: HashMap<String, usize>,
}

impl<T> Default for Columns<T> {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            name_to_index: HashMap::new(),
        }
    }
}

impl<T> Columns<T> {
    /// Register a column. Fails if the case-folded name is taken.
    pub fn add(&mut self, name: &str, adapter: FieldAdapter<T>) -> Result<(), ColumnError> {
        let key = name.to_ascii_lowercase();
        if self.name_to_index.contains_key(&key) {
            return Err(ColumnError::Duplicate {
                name: name.to_string(),
            });
        }
        self.specs.push(ColumnSpec {
            name: name.to_string(),
            adapter,
        });
        self.name_to_index.insert(key, self.specs.len() - 1);
        Ok(())
    }

    /// Number of registered columns.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no column is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered column names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    fn name(&self, col: usize) -> &str {
        &self.specs[col].name
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.name_to_index.get(&key.to_ascii_lowercase()).copied()
    }

    fn encode(&self, record: &T, col: usize) -> String {
        self.specs[col].adapter.to_text(record)
    }

    fn decode(
        &self,
        record: &mut T,
        col: usize,
        value: StringSegment<'_>,
    ) -> Result<(), ColumnError> {
        let spec = &self.specs[col];
        if spec.adapter.set_from_text(record, value) {
            Ok(())
        } else {
            Err(ColumnError::InvalidValue {
                column: spec.name.clone(),
                value: value.as_str().trim().to_string(),
                kind: spec.adapter.kind(),
            })
        }
    }

    fn equals_default(&self, record: &T, col: usize) -> bool {
        self.specs[col].adapter.equals_default_value(record)
    }

    fn reset(&self, record: &mut T) {
        for spec in &self.specs {
            spec.adapter.set_default_value(record);
        }
    }
}

/// A single record viewed as a one-row table.
pub struct RecordAdapter<'a, T> {
    data: &'a mut T,
    columns: Columns<T>,
}

impl<'a, T> RecordAdapter<'a, T> {
    /// Wrap `data` with no columns registered.
    pub fn new(data: &'a mut T) -> Self {
        Self {
            data,
            columns: Columns::default(),
        }
    }

    /// Register a named column.
    pub fn add_named_column(
        &mut self,
        name: &str,
        adapter: FieldAdapter<T>,
    ) -> Result<(), ColumnError> {
        self.columns.add(name, adapter)
    }

    /// The registered columns.
    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    /// The viewed record.
    pub fn record(&self) -> &T {
        &*self.data
    }

    /// The viewed record, mutably.
    pub fn record_mut(&mut self) -> &mut T {
        &mut *self.data
    }

    fn check_row(row: usize) {
        assert!(row == 0, "row {row} out of bounds for a fixed table");
    }
}

impl<T> Table for RecordAdapter<'_, T> {
    fn new_row(&mut self) -> Option<usize> {
        None
    }

    fn set_default_values(&mut self, row: usize) {
        Self::check_row(row);
        self.columns.reset(&mut *self.data);
    }

    fn is_fixed_size(&self) -> bool {
        true
    }

    fn column_name(&self, col: usize) -> &str {
        self.columns.name(col)
    }

    fn value(&self, row: usize, col: usize) -> String {
        Self::check_row(row);
        self.columns.encode(&*self.data, col)
    }

    fn set_value(
        &mut self,
        row: usize,
        col: usize,
        value: StringSegment<'_>,
    ) -> Result<(), ColumnError> {
        Self::check_row(row);
        self.columns.decode(&mut *self.data, col, value)
    }

    fn column_by_name(&self, key: &str) -> Option<usize> {
        self.columns.index_of(key)
    }

    fn equals_default_value(&self, row: usize, col: usize) -> bool {
        Self::check_row(row);
        self.columns.equals_default(&*self.data, col)
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn row_count(&self) -> usize {
        1
    }
}

/// A list of records viewed as a growable table.
pub struct TableAdapter<'a, T> {
    data: &'a mut Vec<T>,
    columns: Columns<T>,
}

impl<'a, T: Default> TableAdapter<'a, T> {
    /// Wrap `data` with no columns registered.
    pub fn new(data: &'a mut Vec<T>) -> Self {
        Self {
            data,
            columns: Columns::default(),
        }
    }

    /// Register a named column.
    pub fn add_named_column(
        &mut self,
        name: &str,
        adapter: FieldAdapter<T>,
    ) -> Result<(), ColumnError> {
        self.columns.add(name, adapter)
    }

    /// The registered columns.
    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    /// The viewed records.
    pub fn records(&self) -> &[T] {
        self.data.as_slice()
    }

    /// The viewed records, mutably.
    pub fn records_mut(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }
}

impl<T: Default> Table for TableAdapter<'_, T> {
    fn new_row(&mut self) -> Option<usize> {
        self.data.push(T::default());
        let row = self.data.len() - 1;
        self.set_default_values(row);
        Some(row)
    }

    fn set_default_values(&mut self, row: usize) {
        self.columns.reset(&mut self.data[row]);
    }

    fn is_fixed_size(&self) -> bool {
        false
    }

    fn column_name(&self, col: usize) -> &str {
        self.columns.name(col)
    }

    fn value(&self, row: usize, col: usize) -> String {
        self.columns.encode(&self.data[row], col)
    }

    fn set_value(
        &mut self,
        row: usize,
        col: usize,
        value: StringSegment<'_>,
    ) -> Result<(), ColumnError> {
        self.columns.decode(&mut self.data[row], col, value)
    }

    fn column_by_name(&self, key: &str) -> Option<usize> {
        self.columns.index_of(key)
    }

    fn equals_default_value(&self, row: usize, col: usize) -> bool {
        self.columns.equals_default(&self.data[row], col)
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn row_count(&self) -> usize {
        self.data.len()
    }
}
