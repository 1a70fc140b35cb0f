//! # Shared Containers
//!
//! The compiler's symbol bookkeeping runs on an ordered association list
//! rather than a hash map. Sizes are small, and deterministic ordering is
//! what makes slot assignment reproducible across the independent parser
//! and code-generator traversals.

/// An ordered key/value list with a configurable sentinel.
///
/// `put` always appends, so duplicate keys are allowed; `get` scans from the
/// newest entry backwards and returns the most recent value, or the sentinel
/// when the key was never inserted. Insertion order is preserved, which the
/// scope logic relies on for stable stack-slot numbering.
#[derive(Debug, Clone)]
pub struct AssocList<V> {
    keys: Vec<String>,
    vals: Vec<V>,
    default_value: V,
}

impl<V: Clone> AssocList<V> {
    /// Creates an empty list that answers `default_value` for missing keys.
    pub fn new(default_value: V) -> Self {
        Self {
            keys: Vec::with_capacity(16),
            vals: Vec::with_capacity(16),
            default_value,
        }
    }

    /// Appends a key/value pair. An existing key is shadowed, not replaced.
    pub fn put(&mut self, key: &str, val: V) {
        self.keys.push(key.to_string());
        self.vals.push(val);
    }

    /// Returns the most recently inserted value for `key`, or the sentinel.
    pub fn get(&self, key: &str) -> V {
        for (k, v) in self.keys.iter().zip(self.vals.iter()).rev() {
            if k == key {
                return v.clone();
            }
        }
        self.default_value.clone()
    }

    /// Number of entries, counting shadowed duplicates.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_sentinel() {
        let list: AssocList<i64> = AssocList::new(-1);
        assert_eq!(list.get("foo"), -1);
        assert!(list.is_empty());

        let zero_default: AssocList<i64> = AssocList::new(0);
        assert_eq!(zero_default.get("foo"), 0);
    }

    #[test]
    fn newest_value_wins() {
        let mut list = AssocList::new(-1);
        list.put("foo", 2);
        assert_eq!(list.get("foo"), 2);

        list.put("bar", 4);
        assert_eq!(list.get("bar"), 4);

        list.put("foo", 6);
        assert_eq!(list.get("foo"), 6);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut list = AssocList::new(0i64);
        for i in 0..100 {
            list.put(&format!("k{i}"), i);
        }
        assert_eq!(list.len(), 100);
        assert_eq!(list.get("k0"), 0);
        assert_eq!(list.get("k50"), 50);
        assert_eq!(list.get("k99"), 99);
    }
}
