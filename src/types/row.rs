use std::fmt;

use crate::traits::ResultHandle;
use crate::types::{ExecStatus, Value};

/// Successful result of one `execute` call.
///
/// Owns the native result handle exclusively; the handle is released when
/// this value is dropped.
pub struct QueryResult<R: ResultHandle> {
    handle: R,
}

impl<R: ResultHandle> QueryResult<R> {
    pub(crate) fn new(handle: R) -> Self {
        Self { handle }
    }

    /// Either `CommandOk` or `TuplesOk`.
    pub fn status(&self) -> ExecStatus {
        self.handle.status()
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.handle.ntuples()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> Vec<&str> {
        (0..self.handle.nfields())
            .map(|i| self.handle.field_name(i).unwrap_or_default())
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        (0..self.handle.nfields()).find(|&i| self.handle.field_name(i) == Some(name))
    }

    /// Type OID of a column.
    pub fn column_type(&self, column: usize) -> Option<u32> {
        self.handle.field_type(column)
    }

    /// Row count reported by the command tag (INSERT, UPDATE, DELETE, SELECT, ...).
    pub fn rows_affected(&self) -> Option<u64> {
        self.handle.rows_affected()
    }

    /// Raw binary value at `row`, `column`. `None` for SQL NULL.
    pub fn get(&self, row: usize, column: usize) -> Option<&[u8]> {
        self.handle.value(row, column)
    }

    /// Returns a view of row `index`, if it exists.
    pub fn row(&self, index: usize) -> Option<Row<'_, R>> {
        (index < self.len()).then_some(Row {
            result: self,
            index,
        })
    }

    /// Returns the rows without consuming the result.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_, R>> + '_ {
        (0..self.len()).map(move |index| Row {
            result: self,
            index,
        })
    }

    /// Returns the only row, or `None` if the result has zero or several rows.
    pub fn single_row(&self) -> Option<Row<'_, R>> {
        if self.len() == 1 {
            self.row(0)
        } else {
            None
        }
    }
}

impl<R: ResultHandle> fmt::Debug for QueryResult<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("status", &self.status())
            .field("columns", &self.columns())
            .field("rows", &self.len())
            .field("rows_affected", &self.rows_affected())
            .finish()
    }
}

/// A single row borrowed from a [`QueryResult`].
pub struct Row<'a, R: ResultHandle> {
    result: &'a QueryResult<R>,
    index: usize,
}

impl<'a, R: ResultHandle> Row<'a, R> {
    /// Position of this row in the result.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw binary value of a column. `None` for SQL NULL.
    pub fn get(&self, column: usize) -> Option<&'a [u8]> {
        self.result.get(self.index, column)
    }

    /// Gets a raw value by column name.
    pub fn get_by_name(&self, name: &str) -> Option<&'a [u8]> {
        self.result.column_index(name).and_then(|i| self.get(i))
    }

    /// Decodes a column using its type OID.
    pub fn value(&self, column: usize) -> Value {
        let oid = self.result.column_type(column).unwrap_or_default();
        Value::decode(oid, self.get(column))
    }

    /// Decodes a column by name; `Value::Null` when the column does not exist.
    pub fn value_by_name(&self, name: &str) -> Value {
        match self.result.column_index(name) {
            Some(column) => self.value(column),
            None => Value::Null,
        }
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.result.handle.nfields()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
