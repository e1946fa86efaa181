//! Paginated result pages.

use super::Value;

/// A page of items plus pagination metadata.
///
/// The dispatcher replaces the backing item list of a page while the
/// metadata (total item count, page size, current page index) survives
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use garnish::value::{Paginated, Value};
///
/// let page = Paginated::new(
///     vec![Value::from("a"), Value::from("b")],
///     10, // total
///     2,  // per page
///     1,  // current page
/// );
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.total(), 10);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paginated {
    items: Vec<Value>,
    total: u64,
    per_page: u64,
    current_page: u64,
}

impl Paginated {
    /// Creates a page from its items and metadata.
    #[inline]
    #[must_use]
    pub const fn new(items: Vec<Value>, total: u64, per_page: u64, current_page: u64) -> Self {
        Self {
            items,
            total,
            per_page,
            current_page,
        }
    }

    /// The items on this page.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Mutable access to the items on this page.
    #[inline]
    #[must_use]
    pub const fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    /// Total number of items across all pages.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of items per page.
    #[inline]
    #[must_use]
    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Index of the current page.
    #[inline]
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Number of items on this page.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the backing item list by mapping each item, keeping the
    /// pagination metadata unchanged.
    #[must_use]
    pub fn map_items(self, mapper: impl FnMut(Value) -> Value) -> Self {
        Self {
            items: self.items.into_iter().map(mapper).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
        }
    }

    /// Projects the page to a JSON object carrying `data` plus the
    /// pagination metadata.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "data": self.items.iter().map(Value::to_json).collect::<Vec<_>>(),
            "total": self.total,
            "per_page": self.per_page,
            "current_page": self.current_page,
        })
    }
}
