use alloc::collections::BTreeMap;

use crate::Value;
use crate::container::ContainerError;
use crate::value::impl_container;

/// A grid storing only its non-empty cells.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::grid::SparseGrid;
///
/// let mut grid = SparseGrid::new(100, 100);
/// grid.set(99, 0, Value::from(1_i32)).unwrap();
///
/// assert_eq!(grid.len(), 1);
/// assert_eq!(grid.get(99, 0), Some(&Value::from(1_i32)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SparseGrid {
    rows: usize,
    columns: usize,
    cells: BTreeMap<(usize, usize), Value>,
}

impl SparseGrid {
    #[inline]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.cells.get(&(row, column))
    }

    /// Sets a cell, returning the previous value. Setting `Null` clears it.
    pub fn set(
        &mut self,
        row: usize,
        column: usize,
        value: Value,
    ) -> Result<Option<Value>, ContainerError> {
        if row >= self.rows || column >= self.columns {
            return Err(ContainerError::OutOfBounds {
                tag: super::SPARSE_GRID.tag(),
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        if value.is_null() {
            return Ok(self.cells.remove(&(row, column)));
        }
        Ok(self.cells.insert((row, column), value))
    }

    /// Grows the grid so that `(row, column)` is inside it.
    pub(crate) fn grow_to_fit(&mut self, row: usize, column: usize) {
        self.rows = self.rows.max(row.saturating_add(1));
        self.columns = self.columns.max(column.saturating_add(1));
    }

    /// Returns the number of non-empty cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over non-empty cells as `(row, column, value)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Value)> {
        self.cells
            .iter()
            .map(|(&(row, column), value)| (row, column, value))
    }
}

impl_container!(ordered SparseGrid => &super::SPARSE_GRID);
