use alloc::collections::BTreeMap;

use bw_utils::hash::HashMap;

use crate::Value;
use crate::value::impl_container;

// -----------------------------------------------------------------------------
// Multiset

/// An unordered bag counting occurrences of each element.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::collect::Multiset;
///
/// let mut bag = Multiset::new();
/// bag.add(Value::from("x"), 2);
/// bag.add(Value::from("x"), 1);
///
/// assert_eq!(bag.count(&Value::from("x")), 3);
/// assert_eq!(bag.len(), 1);
/// assert_eq!(bag.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multiset {
    counts: HashMap<Value, u32>,
}

impl Multiset {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences, equivalent to `count` single additions.
    pub fn add(&mut self, value: Value, count: u32) {
        if count > 0 {
            let entry = self.counts.entry(value).or_insert(0);
            *entry = entry.saturating_add(count);
        }
    }

    #[inline]
    pub fn count(&self, value: &Value) -> u32 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of distinct elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the number of occurrences of all elements.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&count| u64::from(count)).sum()
    }

    /// Iterates over `(element, count)` in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &u32)> {
        self.counts.iter()
    }
}

impl_container!(unordered Multiset => &super::MULTISET);

// -----------------------------------------------------------------------------
// SortedMultiset

/// A bag counting occurrences of each element, iterated in element order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortedMultiset {
    counts: BTreeMap<Value, u32>,
}

impl SortedMultiset {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences, equivalent to `count` single additions.
    pub fn add(&mut self, value: Value, count: u32) {
        if count > 0 {
            let entry = self.counts.entry(value).or_insert(0);
            *entry = entry.saturating_add(count);
        }
    }

    #[inline]
    pub fn count(&self, value: &Value) -> u32 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of distinct elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(element, count)` in element order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &u32)> {
        self.counts.iter()
    }
}

impl_container!(ordered SortedMultiset => &super::SORTED_MULTISET);

#[cfg(test)]
mod tests {
    use super::{Multiset, SortedMultiset};
    use crate::Value;

    #[test]
    fn counted_addition_matches_single_additions() {
        let mut a = Multiset::new();
        a.add(Value::from('z'), 3);

        let mut b = Multiset::new();
        for _ in 0..3 {
            b.add(Value::from('z'), 1);
        }
        assert_eq!(a, b);
        assert_eq!(
            bw_utils::hash::hash_one(&Value::container(a)),
            bw_utils::hash::hash_one(&Value::container(b)),
        );
    }

    #[test]
    fn sorted_iteration() {
        let mut bag = SortedMultiset::new();
        bag.add(Value::from(2_i32), 1);
        bag.add(Value::from(1_i32), 4);
        let items: alloc::vec::Vec<_> = bag.iter().map(|(v, &c)| (v.clone(), c)).collect();
        assert_eq!(items, [(Value::from(1_i32), 4), (Value::from(2_i32), 1)]);
    }
}
