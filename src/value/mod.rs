//! The container/value family classified by the dispatcher.
//!
//! This module provides the closed set of shapes the transform dispatcher
//! distinguishes:
//!
//! - [`Value::Scalar`]: an opaque leaf (including null); never recursed into
//! - [`Value::Sequence`]: a finite ordered sequence
//! - [`Value::Mapping`]: an insertion-ordered associative container
//! - [`Value::Paginated`]: a page of items plus pagination metadata
//! - [`Value::Object`]: an eligible (presentable) domain object
//! - [`Value::Presented`]: a decorated transformer (output side)
//!
//! Containers and presentable objects are disjoint variants, so a
//! presentable object is never itself iterated as a container, and an
//! already-presented value is never re-wrapped.
//!
//! # Examples
//!
//! ## Building values
//!
//! ```rust
//! use garnish::value::{Mapping, Value};
//!
//! let scalar = Value::from(42);
//! assert!(scalar.is_scalar());
//!
//! let sequence = Value::from(vec![1, 2, 3]);
//! assert_eq!(sequence.as_sequence().map(<[Value]>::len), Some(3));
//!
//! let mapping = Value::from(garnish::mapping! {
//!     "title" => "Holiday",
//!     "plays" => 1024,
//! });
//! assert!(mapping.is_mapping());
//! ```
//!
//! ## JSON projection
//!
//! ```rust
//! use garnish::value::Value;
//!
//! let value = Value::from(vec!["a", "b"]);
//! assert_eq!(value.to_json(), serde_json::json!(["a", "b"]));
//! ```

use std::fmt;

use crate::present::{Presentable, Transformer};

mod mapping;
mod paginated;
mod relations;

pub use mapping::Mapping;
pub use paginated::Paginated;
pub use relations::Relations;

// =============================================================================
// Value
// =============================================================================

/// A value in the shape family the dispatcher classifies.
///
/// `Value` is the single input and output type of
/// [`Dispatcher::transform`](crate::present::Dispatcher::transform): callers
/// lift domain data into a `Value`, the dispatcher rewrites `Object` nodes
/// into `Presented` nodes, and the result projects to JSON via
/// [`to_json`](Value::to_json) or [`serde::Serialize`].
///
/// # Examples
///
/// ```rust
/// use garnish::value::Value;
///
/// let null = Value::null();
/// assert!(null.is_scalar());
///
/// let text = Value::from("hello");
/// assert_eq!(text.to_json(), serde_json::json!("hello"));
/// ```
pub enum Value {
    /// An opaque scalar leaf, including null. Never recursed into.
    Scalar(serde_json::Value),
    /// A finite ordered sequence of values.
    Sequence(Vec<Value>),
    /// An insertion-ordered associative container.
    Mapping(Mapping),
    /// A page of items plus pagination metadata.
    Paginated(Paginated),
    /// An eligible domain object, subject to decoration.
    Object(Box<dyn Presentable>),
    /// A decorated transformer. Not eligible for further decoration.
    Presented(Transformer),
}

impl Value {
    /// Returns the null scalar.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(serde_json::Value::Null)
    }

    /// Lifts a presentable domain object into the value family.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garnish::prelude::*;
    ///
    /// #[derive(Clone, Presentable)]
    /// struct Track {
    ///     title: String,
    /// }
    ///
    /// let value = Value::object(Track { title: "Holiday".to_string() });
    /// assert!(value.is_object());
    /// ```
    #[inline]
    #[must_use]
    pub fn object(object: impl Presentable + 'static) -> Self {
        Self::Object(Box::new(object))
    }

    /// Returns `true` if the value is a scalar leaf.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns `true` if the value is an ordered sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns `true` if the value is an associative container.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Returns `true` if the value is a paginated page.
    #[inline]
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        matches!(self, Self::Paginated(_))
    }

    /// Returns `true` if the value is an undecorated presentable object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns `true` if the value is a decorated transformer.
    #[inline]
    #[must_use]
    pub const fn is_presented(&self) -> bool {
        matches!(self, Self::Presented(_))
    }

    /// Returns the scalar payload, if the value is a scalar.
    #[inline]
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the sequence elements, if the value is a sequence.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a mutable view of the sequence elements, if the value is a
    /// sequence.
    #[inline]
    #[must_use]
    pub const fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping, if the value is an associative container.
    #[inline]
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns a mutable view of the mapping, if the value is an
    /// associative container.
    #[inline]
    #[must_use]
    pub const fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the page, if the value is paginated.
    #[inline]
    #[must_use]
    pub const fn as_paginated(&self) -> Option<&Paginated> {
        match self {
            Self::Paginated(page) => Some(page),
            _ => None,
        }
    }

    /// Returns a mutable view of the page, if the value is paginated.
    #[inline]
    #[must_use]
    pub const fn as_paginated_mut(&mut self) -> Option<&mut Paginated> {
        match self {
            Self::Paginated(page) => Some(page),
            _ => None,
        }
    }

    /// Returns the presentable object, if the value is an undecorated
    /// object.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&dyn Presentable> {
        match self {
            Self::Object(object) => Some(object.as_ref()),
            _ => None,
        }
    }

    /// Returns the transformer, if the value is presented.
    #[inline]
    #[must_use]
    pub const fn as_presented(&self) -> Option<&Transformer> {
        match self {
            Self::Presented(transformer) => Some(transformer),
            _ => None,
        }
    }

    /// Consumes the value, returning the sequence elements if it is a
    /// sequence.
    #[inline]
    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the value, returning the mapping if it is an associative
    /// container.
    #[inline]
    #[must_use]
    pub fn into_mapping(self) -> Option<Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Consumes the value, returning the page if it is paginated.
    #[inline]
    #[must_use]
    pub fn into_paginated(self) -> Option<Paginated> {
        match self {
            Self::Paginated(page) => Some(page),
            _ => None,
        }
    }

    /// Consumes the value, returning the presentable object if it is an
    /// undecorated object.
    #[inline]
    #[must_use]
    pub fn into_object(self) -> Option<Box<dyn Presentable>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Consumes the value, returning the transformer if it is presented.
    #[inline]
    #[must_use]
    pub fn into_presented(self) -> Option<Transformer> {
        match self {
            Self::Presented(transformer) => Some(transformer),
            _ => None,
        }
    }

    /// Projects the value to JSON. Total: never fails.
    ///
    /// - Scalars clone their payload.
    /// - Sequences become arrays, mappings become objects.
    /// - A paginated page becomes an object carrying `data` plus its
    ///   pagination metadata.
    /// - An undecorated object yields its exportable snapshot, or null
    ///   when the object is not array-exportable.
    /// - A presented transformer yields its resolved mapping.
    ///
    /// Key order in the JSON tree follows `serde_json`'s canonical order;
    /// [`Mapping`] itself preserves insertion order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Scalar(scalar) => scalar.clone(),
            Self::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Mapping(mapping) => mapping.to_json(),
            Self::Paginated(page) => page.to_json(),
            Self::Object(object) => object
                .export()
                .map_or(serde_json::Value::Null, |snapshot| snapshot.to_json()),
            Self::Presented(transformer) => transformer.to_json(),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(scalar) => Self::Scalar(scalar.clone()),
            Self::Sequence(items) => Self::Sequence(items.clone()),
            Self::Mapping(mapping) => Self::Mapping(mapping.clone()),
            Self::Paginated(page) => Self::Paginated(page.clone()),
            Self::Object(object) => Self::Object(object.clone_presentable()),
            Self::Presented(transformer) => Self::Presented(transformer.clone()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => formatter.debug_tuple("Scalar").field(scalar).finish(),
            Self::Sequence(items) => formatter.debug_tuple("Sequence").field(items).finish(),
            Self::Mapping(mapping) => formatter.debug_tuple("Mapping").field(mapping).finish(),
            Self::Paginated(page) => formatter.debug_tuple("Paginated").field(page).finish(),
            Self::Object(object) => formatter
                .debug_tuple("Object")
                .field(&object.type_key().label())
                .finish(),
            Self::Presented(transformer) => formatter
                .debug_tuple("Presented")
                .field(transformer)
                .finish(),
        }
    }
}

/// Structural equality.
///
/// Containers compare element-wise. Two `Object` values are equal when
/// they share a runtime type and an exportable snapshot; two `Presented`
/// values are equal when they share a presenter and resolve to the same
/// mapping. Values of different shapes are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(left), Self::Scalar(right)) => left == right,
            (Self::Sequence(left), Self::Sequence(right)) => left == right,
            (Self::Mapping(left), Self::Mapping(right)) => left == right,
            (Self::Paginated(left), Self::Paginated(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => {
                left.type_key() == right.type_key() && left.export() == right.export()
            }
            (Self::Presented(left), Self::Presented(right)) => {
                left.presenter_label() == right.presenter_label()
                    && left.to_mapping() == right.to_mapping()
            }
            _ => false,
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<serde_json::Value> for Value {
    #[inline]
    fn from(scalar: serde_json::Value) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(flag: bool) -> Self {
        Self::Scalar(serde_json::Value::Bool(flag))
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(number: i32) -> Self {
        Self::Scalar(serde_json::Value::from(number))
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(number: i64) -> Self {
        Self::Scalar(serde_json::Value::from(number))
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(number: u32) -> Self {
        Self::Scalar(serde_json::Value::from(number))
    }
}

impl From<u64> for Value {
    #[inline]
    fn from(number: u64) -> Self {
        Self::Scalar(serde_json::Value::from(number))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(number: f64) -> Self {
        Self::Scalar(serde_json::Value::from(number))
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Scalar(serde_json::Value::String(text.to_string()))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(text: String) -> Self {
        Self::Scalar(serde_json::Value::String(text))
    }
}

/// `None` lifts to the null scalar, `Some` lifts its payload.
impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(option: Option<T>) -> Self {
        option.map_or_else(Self::null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping> for Value {
    #[inline]
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<Paginated> for Value {
    #[inline]
    fn from(page: Paginated) -> Self {
        Self::Paginated(page)
    }
}

impl From<Transformer> for Value {
    #[inline]
    fn from(transformer: Transformer) -> Self {
        Self::Presented(transformer)
    }
}
