//! # garnish
//!
//! A presenter/transformer decoration layer for domain objects.
//!
//! ## Overview
//!
//! Given a domain object (or a collection/paginator of them), `garnish`
//! optionally wraps it in a registered transformer that exposes computed
//! and pass-through fields for output (views or JSON) without mutating
//! the underlying domain object. The library is built from three parts:
//!
//! - **Value family**: a closed set of container/value variants
//!   (scalar, sequence, mapping, paginated page, eligible object,
//!   presented transformer) that the dispatcher classifies structurally.
//! - **Transformer**: a read-only view bound to a defensive clone of one
//!   eligible object, resolving each field through a computed-method-first,
//!   stored-field-second, default-last chain.
//! - **Dispatcher**: holds the type-to-presenter registry and recursively
//!   decorates containers, paginated pages, and loaded relations.
//!
//! ## Feature Flags
//!
//! - `derive`: the `#[derive(Presentable)]` macro (enabled by default)
//!
//! ## Example
//!
//! ```rust
//! use garnish::prelude::*;
//!
//! #[derive(Clone, Presentable)]
//! struct Track {
//!     title: String,
//!     seconds: u64,
//! }
//!
//! #[derive(Clone, Default)]
//! struct TrackPresenter;
//!
//! impl Presenter for TrackPresenter {
//!     fn computed_fields(&self) -> &'static [&'static str] {
//!         &["duration"]
//!     }
//!
//!     fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
//!         let track = source.as_any().downcast_ref::<Track>()?;
//!         match field {
//!             "duration" => Some(Value::from(format!(
//!                 "{}:{:02}",
//!                 track.seconds / 60,
//!                 track.seconds % 60
//!             ))),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register::<Track, TrackPresenter>();
//!
//! let track = Track { title: "Holiday".to_string(), seconds: 212 };
//! let presented = dispatcher.transform(Value::object(track));
//!
//! let transformer = presented.as_presented().unwrap();
//! assert_eq!(transformer.get("title"), Some(Value::from("Holiday")));
//! assert_eq!(transformer.get("duration"), Some(Value::from("3:32")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use garnish::prelude::*;
/// ```
pub mod prelude {
    pub use crate::present::*;
    pub use crate::value::*;
}

pub mod present;
pub mod value;
