//! Insertion-ordered associative container.

use std::fmt;

use super::Value;

/// An insertion-ordered, string-keyed associative container.
///
/// Inserting an existing key overwrites its value in place (the key keeps
/// its original position); inserting a new key appends. This is the
/// associative-container shape the dispatcher recurses into, and the shape
/// a transformer's [`to_mapping`](crate::present::Transformer::to_mapping)
/// produces.
///
/// # Examples
///
/// ```rust
/// use garnish::value::{Mapping, Value};
///
/// let mut mapping = Mapping::new();
/// mapping.insert("title", "Holiday");
/// mapping.insert("plays", 1024);
/// mapping.insert("title", "Basket Case");
///
/// let keys: Vec<&str> = mapping.keys().collect();
/// assert_eq!(keys, vec!["title", "plays"]);
/// assert_eq!(mapping.get("title"), Some(&Value::from("Basket Case")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty mapping with space reserved for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a key/value pair.
    ///
    /// Returns the previous value if the key was already present; the key
    /// keeps its original position. A new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.value_slot(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.value_slot(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    /// Removes `key`, returning its value. The relative order of the
    /// remaining entries is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let position = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Iterates over mutable values in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Projects the mapping to a JSON object.
    ///
    /// Key order in the result follows `serde_json`'s canonical order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    fn value_slot(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.to_json())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut mapping = Self::new();
        mapping.extend(iterable);
        mapping
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Value)>,
        fn(&'a (String, Value)) -> (&'a String, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn entry_refs(entry: &(String, Value)) -> (&String, &Value) {
            (&entry.0, &entry.1)
        }
        self.entries
            .iter()
            .map(entry_refs as fn(&'a (String, Value)) -> (&'a String, &'a Value))
    }
}

/// Builds a [`Mapping`] from `key => value` pairs.
///
/// Values go through [`Value::from`], so anything convertible to a
/// [`Value`] works on the right-hand side.
///
/// # Examples
///
/// ```rust
/// use garnish::mapping;
///
/// let record = mapping! {
///     "title" => "Holiday",
///     "plays" => 1024,
///     "live" => true,
/// };
/// assert_eq!(record.len(), 3);
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::value::Mapping::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut mapping = $crate::value::Mapping::new();
        $(
            mapping.insert($key, $crate::value::Value::from($value));
        )+
        mapping
    }};
}
