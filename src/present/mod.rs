//! The decoration machinery: presentable objects, presenters, bound
//! transformers, and the transform dispatcher.
//!
//! This module provides:
//!
//! - [`Presentable`]: the capability tag for objects eligible for
//!   decoration, with optional array-exportable and relation-map
//!   capabilities
//! - [`Presenter`]: the user-implemented trait carrying computed fields
//!   and the bind lifecycle hook
//! - [`Transformer`]: a read-only view bound to a defensive clone of one
//!   presentable object
//! - [`Dispatcher`]: the component that decides whether/how to wrap a
//!   value and recurses into containers and loaded relations
//! - [`Registry`]: the type-to-presenter mapping driving dispatch
//!
//! # Examples
//!
//! ```rust
//! use garnish::prelude::*;
//!
//! #[derive(Clone, Presentable)]
//! struct Article {
//!     title: String,
//! }
//!
//! #[derive(Clone, Default)]
//! struct ArticlePresenter;
//!
//! impl Presenter for ArticlePresenter {}
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register::<Article, ArticlePresenter>();
//!
//! let article = Article { title: "On decorators".to_string() };
//! let presented = dispatcher.transform(Value::object(article));
//! assert!(presented.is_presented());
//! ```

mod dispatch;
mod error;
mod presentable;
mod transformer;

pub use dispatch::{Dispatcher, Registry, TransformerBinding};
pub use error::{ImmutableWriteError, PresentError, TransformerLookupError, WriteOperation};
pub use presentable::{Presentable, TypeKey};
pub use transformer::{Presenter, PresenterClone, PresenterExt, Transformer};

/// Derives [`Presentable`] for a named-field struct.
///
/// See the [crate-level documentation](crate) for an end-to-end example.
#[cfg(feature = "derive")]
pub use garnish_derive::Presentable;
