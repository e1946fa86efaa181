//! Derive macro for the garnish `Presentable` capability.
//!
//! This crate provides `#[derive(Presentable)]`, which implements the
//! capability tag marking a named-field struct as eligible for
//! decoration by a garnish dispatcher.
//!
//! # Example
//!
//! ```rust,ignore
//! use garnish::prelude::*;
//! use garnish::value::Relations;
//!
//! #[derive(Clone, Presentable)]
//! struct Article {
//!     title: String,
//!     #[presentable(rename = "body")]
//!     content: String,
//!     #[presentable(skip)]
//!     internal_revision: u64,
//!     #[presentable(relations)]
//!     relations: Relations,
//! }
//! ```
//!
//! # Field Attributes
//!
//! - `#[presentable(skip)]`: excludes the field from named-field access
//!   and from the exportable snapshot
//! - `#[presentable(rename = "key")]`: the key used for field access and
//!   export instead of the field name
//! - `#[presentable(relations)]`: marks the field holding the
//!   `Relations` map, wiring the relation capability; the field itself
//!   is excluded from access and export
//!
//! # Struct Attributes
//!
//! - `#[presentable(no_export)]`: opts the type out of the
//!   array-exportable capability (`export` returns `None`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod presentable;

use proc_macro::TokenStream;

/// Derives the `Presentable` capability for a named-field struct.
///
/// The struct must also implement `Clone` (binding clones defensively),
/// and every non-skipped field type must convert into a garnish `Value`
/// via `From`.
#[proc_macro_derive(Presentable, attributes(presentable))]
pub fn derive_presentable(input: TokenStream) -> TokenStream {
    presentable::derive_presentable_impl(input)
}
