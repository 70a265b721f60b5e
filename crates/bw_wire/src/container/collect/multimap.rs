use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::Value;
use crate::value::impl_container;

// -----------------------------------------------------------------------------
// ListMultimap

/// A map from each key to an ordered list of values, duplicates allowed.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::collect::ListMultimap;
///
/// let mut map = ListMultimap::new();
/// map.insert(Value::from("a"), Value::from(1_i32));
/// map.insert(Value::from("a"), Value::from(1_i32));
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&Value::from("a")).len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListMultimap {
    map: BTreeMap<Value, Vec<Value>>,
    len: usize,
}

impl ListMultimap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        self.map.entry(key).or_default().push(value);
        self.len += 1;
    }

    /// Returns the values of `key`, empty if absent.
    #[inline]
    pub fn get(&self, key: &Value) -> &[Value] {
        self.map.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the total number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over every `(key, value)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.map
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
    }
}

impl_container!(ordered ListMultimap => &super::LIST_MULTIMAP);

// -----------------------------------------------------------------------------
// SetMultimap

/// A map from each key to a set of distinct values.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetMultimap {
    map: BTreeMap<Value, BTreeSet<Value>>,
    len: usize,
}

impl SetMultimap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, returns `false` if it was already present.
    pub fn insert(&mut self, key: Value, value: Value) -> bool {
        let inserted = self.map.entry(key).or_default().insert(value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    #[inline]
    pub fn get(&self, key: &Value) -> Option<&BTreeSet<Value>> {
        self.map.get(key)
    }

    /// Returns the total number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over every `(key, value)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.map
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
    }
}

impl_container!(ordered SetMultimap => &super::SET_MULTIMAP);

#[cfg(test)]
mod tests {
    use super::SetMultimap;
    use crate::Value;

    #[test]
    fn set_multimap_dedups() {
        let mut map = SetMultimap::new();
        assert!(map.insert(Value::from(1_i32), Value::from("a")));
        assert!(!map.insert(Value::from(1_i32), Value::from("a")));
        assert!(map.insert(Value::from(1_i32), Value::from("b")));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().count(), 2);
    }
}
