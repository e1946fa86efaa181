//! Loaded-relation maps for model-like objects.

use super::Value;

/// The relation-name to value map of a model-like object.
///
/// `Relations` stores *already loaded* relations only; it never loads
/// anything itself. The dispatcher treats loaded relation values as
/// ordinary values subject to recursive transformation and leaves absent
/// (unloaded) relations untouched.
///
/// # Examples
///
/// ```rust
/// use garnish::value::{Relations, Value};
///
/// let mut relations = Relations::new();
/// relations.load("author", Value::from("nested value"));
///
/// assert!(relations.is_loaded("author"));
/// assert!(!relations.is_loaded("comments"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Relations {
    loaded: Vec<(String, Value)>,
}

impl Relations {
    /// Creates an empty relation map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { loaded: Vec::new() }
    }

    /// Records a loaded relation. Loading an already-present name
    /// overwrites its value in place.
    pub fn load(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.value_slot(&name) {
            *slot = value;
        } else {
            self.loaded.push((name, value));
        }
        self
    }

    /// Returns the loaded value under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.loaded
            .iter()
            .find(|(relation, _)| relation == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if a relation named `name` has been loaded.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|(relation, _)| relation == name)
    }

    /// The loaded relation names, in load order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.loaded
            .iter()
            .map(|(relation, _)| relation.clone())
            .collect()
    }

    /// Takes the value loaded under `name`, leaving a null placeholder in
    /// its slot so [`put`](Relations::put) restores the original position.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.value_slot(name)
            .map(|slot| std::mem::replace(slot, Value::null()))
    }

    /// Writes a value back under `name`. An existing slot is overwritten
    /// in place; a new name is appended.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.load(name, value);
    }

    /// Number of loaded relations.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Returns `true` if no relations have been loaded.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Iterates over loaded relations in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.loaded
            .iter()
            .map(|(relation, value)| (relation.as_str(), value))
    }

    fn value_slot(&mut self, name: &str) -> Option<&mut Value> {
        self.loaded
            .iter_mut()
            .find(|(relation, _)| relation == name)
            .map(|(_, value)| value)
    }
}

impl IntoIterator for Relations {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.loaded.into_iter()
    }
}
