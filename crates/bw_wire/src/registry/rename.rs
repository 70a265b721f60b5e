use alloc::string::{String, ToString};

use bw_utils::hash::HashMap;

// -----------------------------------------------------------------------------
// RenameTable

/// Historical type paths mapped to their current paths.
///
/// Renames may be chained: `a::Old -> b::Mid -> c::New` resolves `a::Old`
/// to `c::New`. A cycle stops the resolution at the last path seen before
/// the repeat.
///
/// # Examples
///
/// ```
/// use bw_wire::registry::RenameTable;
///
/// let mut renames = RenameTable::new();
/// renames.insert("app::v1::Person", "app::model::Person");
///
/// assert_eq!(renames.current("app::v1::Person"), Some("app::model::Person"));
/// assert_eq!(renames.current("app::model::Person"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenameTable {
    renames: HashMap<String, String>,
}

impl RenameTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `old` is now called `new`, replacing any previous target.
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) {
        let old = old.into();
        let new = new.into();
        let old = old.strip_prefix("::").map(ToString::to_string).unwrap_or(old);
        let new = new.strip_prefix("::").map(ToString::to_string).unwrap_or(new);
        if old != new {
            self.renames.insert(old, new);
        }
    }

    /// Returns the direct rename target of `old`.
    #[inline]
    pub fn get(&self, old: &str) -> Option<&str> {
        self.renames.get(old).map(String::as_str)
    }

    /// Follows renames from `old` to the newest path, `None` if `old` was
    /// never renamed.
    pub fn current(&self, old: &str) -> Option<&str> {
        let mut current = self.get(old)?;
        for _ in 0..self.renames.len() {
            match self.get(current) {
                Some(next) if next != old => current = next,
                _ => break,
            }
        }
        Some(current)
    }

    /// Copies every rename of `other` into `self`, `other` wins on conflict.
    pub fn extend(&mut self, other: &RenameTable) {
        for (old, new) in other.iter() {
            self.insert(old, new);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Iterates over `(old, new)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renames.iter().map(|(old, new)| (old.as_str(), new.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::RenameTable;

    #[test]
    fn chained_renames() {
        let mut renames = RenameTable::new();
        renames.insert("a::Old", "b::Mid");
        renames.insert("b::Mid", "c::New");
        assert_eq!(renames.current("a::Old"), Some("c::New"));
        assert_eq!(renames.current("b::Mid"), Some("c::New"));
        assert_eq!(renames.get("a::Old"), Some("b::Mid"));
    }

    #[test]
    fn cycle_terminates() {
        let mut renames = RenameTable::new();
        renames.insert("a::X", "b::Y");
        renames.insert("b::Y", "a::X");
        assert_eq!(renames.current("a::X"), Some("b::Y"));
    }

    #[test]
    fn leading_colons_and_self_renames() {
        let mut renames = RenameTable::new();
        renames.insert("::a::X", "::b::X");
        renames.insert("c::Same", "c::Same");
        assert_eq!(renames.get("a::X"), Some("b::X"));
        assert_eq!(renames.len(), 1);
    }
}
