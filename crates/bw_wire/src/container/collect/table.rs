use alloc::collections::{BTreeMap, BTreeSet};

use crate::Value;
use crate::value::impl_container;

/// A two-key map from `(row, column)` to a value.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::collect::Table;
///
/// let mut table = Table::new();
/// table.insert(Value::from("r1"), Value::from("c1"), Value::from(1_i32));
/// table.insert(Value::from("r1"), Value::from("c2"), Value::from(2_i32));
/// table.insert(Value::from("r2"), Value::from("c1"), Value::from(3_i32));
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.column_count(), 2);
/// assert_eq!(table.get(&Value::from("r2"), &Value::from("c1")), Some(&Value::from(3_i32)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Table {
    rows: BTreeMap<Value, BTreeMap<Value, Value>>,
    len: usize,
}

impl Table {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell, returning the previous value.
    pub fn insert(&mut self, row: Value, column: Value, value: Value) -> Option<Value> {
        let previous = self.rows.entry(row).or_default().insert(column, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    #[inline]
    pub fn get(&self, row: &Value, column: &Value) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// Returns the number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct row keys.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of distinct column keys.
    pub fn column_count(&self) -> usize {
        self.rows
            .values()
            .flat_map(BTreeMap::keys)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Iterates over `(row, column, value)` cells, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value, &Value)> {
        self.rows.iter().flat_map(|(row, columns)| {
            columns
                .iter()
                .map(move |(column, value)| (row, column, value))
        })
    }
}

impl_container!(ordered Table => &super::TABLE);

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::Value;

    #[test]
    fn overwrite_keeps_len() {
        let mut table = Table::new();
        assert_eq!(table.insert(Value::from(1_i32), Value::from(1_i32), Value::from("a")), None);
        assert_eq!(
            table.insert(Value::from(1_i32), Value::from(1_i32), Value::from("b")),
            Some(Value::from("a"))
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().count(), 1);
    }
}
