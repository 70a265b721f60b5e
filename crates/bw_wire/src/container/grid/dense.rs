use alloc::vec::Vec;

use crate::Value;
use crate::container::ContainerError;
use crate::container::cursor::CellAccess;
use crate::value::impl_container;

/// A grid storing every cell, [`Value::Null`] marks an empty cell.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::grid::DenseGrid;
///
/// let mut grid = DenseGrid::new(2, 3).unwrap();
/// grid.set(1, 2, Value::from("x")).unwrap();
///
/// assert_eq!(grid.get(1, 2), Some(&Value::from("x")));
/// assert_eq!(grid.get(0, 0), None);
/// assert_eq!(grid.len(), 1);
/// assert!(grid.set(2, 0, Value::from("y")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DenseGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Value>,
}

impl DenseGrid {
    /// Creates an empty grid of the given size.
    ///
    /// Fails with [`ContainerError::TooLarge`] if the cells cannot be
    /// allocated.
    pub fn new(rows: usize, columns: usize) -> Result<Self, ContainerError> {
        let too_large = || ContainerError::TooLarge {
            tag: super::DENSE_GRID.tag(),
            rows,
            columns,
        };
        let len = rows.checked_mul(columns).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, Value::Null);
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns a non-empty cell.
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells
            .get(row * self.columns + column)
            .filter(|value| !value.is_null())
    }

    /// Sets a cell, returning the previous non-empty value.
    pub fn set(
        &mut self,
        row: usize,
        column: usize,
        value: Value,
    ) -> Result<Option<Value>, ContainerError> {
        let index = (row < self.rows && column < self.columns)
            .then(|| row * self.columns + column);
        let Some(cell) = index.and_then(|index| self.cells.get_mut(index)) else {
            return Err(ContainerError::OutOfBounds {
                tag: super::DENSE_GRID.tag(),
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        };
        let previous = core::mem::replace(cell, value);
        Ok((!previous.is_null()).then_some(previous))
    }

    /// Returns the number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|value| !value.is_null()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over non-empty cells as `(row, column, value)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Value)> {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(move |(index, value)| (index / columns, index % columns, value))
    }
}

impl CellAccess for DenseGrid {
    #[inline]
    fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.get(row, column)
    }
}

impl_container!(ordered DenseGrid => &super::DENSE_GRID);
