//! The capability tag for objects eligible for decoration.

use std::any::{Any, TypeId, type_name};
use std::fmt;

use crate::value::{Mapping, Value};

/// Runtime type identity of a presentable object.
///
/// A `TypeKey` pairs the [`TypeId`] of a concrete type with its type name
/// for diagnostics. Registry entries are keyed by it, and lookup uses the
/// *runtime* type behind the trait object, never a statically declared
/// type.
///
/// # Examples
///
/// ```rust
/// use garnish::present::TypeKey;
///
/// struct Article;
///
/// let key = TypeKey::of::<Article>();
/// assert!(key.label().ends_with("Article"));
/// assert_eq!(key, TypeKey::of::<Article>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    label: &'static str,
}

impl TypeKey {
    /// Returns the key identifying `T`.
    #[inline]
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            label: type_name::<T>(),
        }
    }

    /// The type name behind this key, for diagnostics.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.label)
    }
}

/// The capability tag identifying objects eligible for decoration.
///
/// Implementors are domain values the dispatcher may wrap in a registered
/// presenter. The required surface is small: runtime type identity, a
/// defensive clone, named-field read access, and `Any` downcasting for
/// typed access inside computed-field methods.
///
/// Two optional capabilities layer on top:
///
/// - **array-exportable**: [`export`](Presentable::export) returns an
///   ordered snapshot of the object's fields, used for whole-object
///   serialization. The default (`None`) opts out.
/// - **relation map**: [`relation_names`](Presentable::relation_names) /
///   [`take_relation`](Presentable::take_relation) /
///   [`put_relation`](Presentable::put_relation) expose *already loaded*
///   relations for in-place transformation. The defaults expose none.
///
/// Most implementations come from `#[derive(Presentable)]`; a manual
/// implementation looks like this:
///
/// ```rust
/// use garnish::present::{Presentable, TypeKey};
/// use garnish::value::{Mapping, Value};
/// use std::any::Any;
///
/// #[derive(Clone)]
/// struct Track {
///     title: String,
///     seconds: u64,
/// }
///
/// impl Presentable for Track {
///     fn type_key(&self) -> TypeKey {
///         TypeKey::of::<Self>()
///     }
///
///     fn clone_presentable(&self) -> Box<dyn Presentable> {
///         Box::new(self.clone())
///     }
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "title" => Some(Value::from(self.title.clone())),
///             "seconds" => Some(Value::from(self.seconds)),
///             _ => None,
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let track = Track { title: "Holiday".to_string(), seconds: 212 };
/// assert!(track.has_field("title"));
/// assert!(!track.has_field("album"));
/// ```
pub trait Presentable {
    /// The runtime type identity used for registry lookup.
    fn type_key(&self) -> TypeKey;

    /// Returns a defensive clone of this object.
    ///
    /// Binding a transformer always goes through this clone, which is what
    /// guarantees the caller-visible original is never mutated.
    fn clone_presentable(&self) -> Box<dyn Presentable>;

    /// Reads the stored field named `name`, or `None` when no such field
    /// exists. Evaluated on access.
    fn field(&self, name: &str) -> Option<Value>;

    /// Upcast for typed access in presenter computed-field methods.
    fn as_any(&self) -> &dyn Any;

    /// Returns `true` if a stored field named `name` exists.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The array-exportable capability: an ordered snapshot of this
    /// object's fields, or `None` when the object opts out of
    /// whole-object serialization.
    fn export(&self) -> Option<Mapping> {
        None
    }

    /// Names of the *already loaded* relations, in load order. Empty for
    /// objects without a relation map.
    fn relation_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Takes the loaded relation value under `name` for in-place
    /// transformation. Must never trigger any loading.
    fn take_relation(&mut self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    /// Writes a transformed relation value back under `name`.
    fn put_relation(&mut self, name: &str, value: Value) {
        let _ = (name, value);
    }
}

static_assertions::assert_obj_safe!(Presentable);
