use crate::value::Value;
use std::hash::{Hash, Hasher};

///
/// Tuple
///
/// Ordered key → value record with unique keys.
///
/// - Insertion order is preserved; replacing an existing key keeps its position.
/// - Equality and hashing ignore order: two tuples are equal when they carry
///   the same key/value pairs.
/// - Lookups are linear; tuples are expected to stay narrow.
///

#[derive(Clone, Debug, Default)]
pub struct Tuple {
    entries: Vec<(String, Value)>,
}

impl Tuple {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Value at `key`, with `Null` standing in for an absent field.
    #[must_use]
    pub fn get_or_null(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Insert or replace; returns the previous value when the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    /// Insert every entry from `other`; entries from `other` win on collision.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    /// Move every entry whose key is listed into a new tuple.
    ///
    /// The extracted tuple keeps this tuple's order, not the order of `keys`.
    pub fn take_keys(&mut self, keys: &[String]) -> Self {
        let (taken, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(k, _)| keys.contains(k));
        self.entries = kept;

        Self { entries: taken }
    }

    pub fn retain(&mut self, mut f: impl FnMut(&str, &Value) -> bool) {
        self.entries.retain(|(k, v)| f(k, v));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn sorted_entries(&self) -> Vec<&(String, Value)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|(left, _), (right, _)| left.cmp(right));
        sorted
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl Eq for Tuple {}

// Keys are unique, so hashing in key order is consistent with
// order-insensitive equality.
impl Hash for Tuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self.sorted_entries() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Tuple {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut tuple = Self::new();
        for (key, value) in iter {
            tuple.insert(key, value);
        }
        tuple
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Tuple {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Tuple {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

///
/// tuple!
///
/// Inline tuple literal: `tuple! { "name" => "Jane", "age" => 30 }`.
///

#[macro_export]
macro_rules! tuple {
    () => {
        $crate::value::Tuple::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut tuple = $crate::value::Tuple::new();
        $(
            tuple.insert($key, $crate::value::Value::from($value));
        )+
        tuple
    }};
}
