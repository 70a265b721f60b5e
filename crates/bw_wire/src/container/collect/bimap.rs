use alloc::collections::BTreeMap;
use alloc::string::ToString;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::Value;
use crate::container::ContainerError;
use crate::value::impl_container;

/// A map that is also a map from values back to keys.
///
/// Values are unique: inserting a value already held under another key
/// is rejected.
///
/// # Examples
///
/// ```
/// use bw_wire::Value;
/// use bw_wire::container::collect::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert(Value::from("one"), Value::from(1_i32)).unwrap();
///
/// assert_eq!(map.get_by_value(&Value::from(1_i32)), Some(&Value::from("one")));
/// assert!(map.insert(Value::from("uno"), Value::from(1_i32)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BiMap {
    forward: BTreeMap<Value, Value>,
    inverse: BTreeMap<Value, Value>,
}

impl BiMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, replacing the previous value of `key`.
    ///
    /// Fails if `value` is already mapped from a different key.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>, ContainerError> {
        if let Some(owner) = self.inverse.get(&value)
            && *owner != key
        {
            return Err(ContainerError::DuplicateValue {
                tag: super::BIMAP.tag(),
                value: value.to_string(),
            });
        }
        let previous = self.forward.insert(key.clone(), value.clone());
        if let Some(previous) = &previous {
            self.inverse.remove(previous);
        }
        self.inverse.insert(value, key);
        Ok(previous)
    }

    #[inline]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.forward.get(key)
    }

    #[inline]
    pub fn get_by_value(&self, value: &Value) -> Option<&Value> {
        self.inverse.get(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.forward.iter()
    }
}

impl PartialEq for BiMap {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl Eq for BiMap {}

impl PartialOrd for BiMap {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BiMap {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.forward.cmp(&other.forward)
    }
}

impl Hash for BiMap {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.forward.hash(state);
    }
}

impl_container!(ordered BiMap => &super::BIMAP);
