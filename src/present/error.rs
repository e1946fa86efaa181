//! Error types for the decoration layer.
//!
//! Only two conditions are errors: requesting a transformer for an
//! unregistered type while bypassing the
//! [`has_transformer_for`](crate::present::Dispatcher::has_transformer_for)
//! guard, and writing through a transformer's map-style interface.
//! Everything else (unknown field, opaque value, unregistered
//! presentable) degrades to silent pass-through.

use thiserror::Error;

/// The operation attempted through a transformer's map-style write
/// interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    /// A `set(key, value)` call.
    Set,
    /// An `unset(key)` call.
    Unset,
}

impl std::fmt::Display for WriteOperation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set => write!(formatter, "set"),
            Self::Unset => write!(formatter, "unset"),
        }
    }
}

/// No transformer is registered for a source type and no override was
/// supplied.
///
/// Raised only by
/// [`lookup_transformer`](crate::present::Dispatcher::lookup_transformer)
/// when a caller bypasses the
/// [`has_transformer_for`](crate::present::Dispatcher::has_transformer_for)
/// guard. Propagated to the caller, never recovered internally.
///
/// # Examples
///
/// ```rust
/// use garnish::present::TransformerLookupError;
///
/// let error = TransformerLookupError {
///     source_type: "blog::Article",
/// };
/// assert_eq!(
///     format!("{error}"),
///     "no transformer registered for `blog::Article` and no override supplied"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no transformer registered for `{source_type}` and no override supplied")]
pub struct TransformerLookupError {
    /// The label of the source type that has no registered transformer.
    pub source_type: &'static str,
}

/// A write or delete was attempted through a transformer's map-style
/// interface.
///
/// Always surfaced, never suppressed: presenters are contractually
/// read-only views.
///
/// # Examples
///
/// ```rust
/// use garnish::present::{ImmutableWriteError, WriteOperation};
///
/// let error = ImmutableWriteError {
///     operation: WriteOperation::Set,
///     key: "title".to_string(),
/// };
/// assert_eq!(
///     format!("{error}"),
///     "cannot set `title`: presenters are read-only views"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {operation} `{key}`: presenters are read-only views")]
pub struct ImmutableWriteError {
    /// Which map-style write was attempted.
    pub operation: WriteOperation,
    /// The key the caller tried to write.
    pub key: String,
}

/// Unified error type for the decoration layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentError {
    /// A transformer lookup failed with no override available.
    #[error(transparent)]
    Lookup(#[from] TransformerLookupError),
    /// A map-style write was attempted on a transformer.
    #[error(transparent)]
    ImmutableWrite(#[from] ImmutableWriteError),
}
