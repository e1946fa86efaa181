//! The transform dispatcher and its type-to-presenter registry.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::present::error::TransformerLookupError;
use crate::present::presentable::{Presentable, TypeKey};
use crate::present::transformer::{Presenter, Transformer};
use crate::value::Value;

/// Default cap on transform recursion depth.
const DEFAULT_MAX_DEPTH: usize = 128;

// =============================================================================
// TransformerBinding
// =============================================================================

/// A registered presenter: its type name plus a zero-argument
/// constructor.
///
/// Bindings are what the registry stores and what dispatch instantiates;
/// registration itself performs no construction ("given a type
/// identifier, produce an instance" is deferred to dispatch time).
///
/// # Examples
///
/// ```rust
/// use garnish::present::{Presenter, TransformerBinding};
///
/// #[derive(Clone, Default)]
/// struct ArticlePresenter;
/// impl Presenter for ArticlePresenter {}
///
/// let binding = TransformerBinding::of::<ArticlePresenter>();
/// assert!(binding.label().ends_with("ArticlePresenter"));
/// ```
#[derive(Clone, Copy)]
pub struct TransformerBinding {
    label: &'static str,
    construct: fn() -> Box<dyn Presenter>,
}

impl TransformerBinding {
    /// Returns the binding for presenter type `P`.
    #[must_use]
    pub fn of<P: Presenter + Default + 'static>() -> Self {
        Self {
            label: std::any::type_name::<P>(),
            construct: construct_presenter::<P>,
        }
    }

    /// The presenter's type name, for diagnostics.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Constructs a fresh presenter instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Presenter> {
        (self.construct)()
    }
}

impl fmt::Debug for TransformerBinding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("TransformerBinding")
            .field(&self.label)
            .finish()
    }
}

fn construct_presenter<P: Presenter + Default + 'static>() -> Box<dyn Presenter> {
    Box::new(P::default())
}

// =============================================================================
// Registry
// =============================================================================

/// The type-to-presenter mapping driving dispatch decisions.
///
/// Keys are unique; merging an entry for an already-registered key
/// overwrites the earlier binding (merge semantics, never
/// replace-whole-map). Lookup is by the *runtime* [`TypeKey`] of an
/// object.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    bindings: HashMap<TypeKey, TransformerBinding>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns `true` if a binding is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: TypeKey) -> bool {
        self.bindings.contains_key(&key)
    }

    /// Returns the binding registered under `key`.
    #[must_use]
    pub fn get(&self, key: TypeKey) -> Option<&TransformerBinding> {
        self.bindings.get(&key)
    }

    /// Merges bindings into the registry; later entries for an existing
    /// key overwrite.
    pub fn merge(&mut self, bindings: impl IntoIterator<Item = (TypeKey, TransformerBinding)>) {
        self.bindings.extend(bindings);
    }

    /// Iterates over all registered bindings (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = (TypeKey, &TransformerBinding)> {
        self.bindings.iter().map(|(key, binding)| (*key, binding))
    }

    /// Iterates over the registered source-type keys.
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.bindings.keys().copied()
    }

    /// Iterates over `(source label, presenter label)` pairs, for
    /// diagnostics.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.bindings
            .iter()
            .map(|(key, binding)| (key.label(), binding.label()))
    }
}

impl Extend<(TypeKey, TransformerBinding)> for Registry {
    fn extend<I: IntoIterator<Item = (TypeKey, TransformerBinding)>>(&mut self, iterable: I) {
        self.merge(iterable);
    }
}

impl FromIterator<(TypeKey, TransformerBinding)> for Registry {
    fn from_iter<I: IntoIterator<Item = (TypeKey, TransformerBinding)>>(iterable: I) -> Self {
        let mut registry = Self::new();
        registry.merge(iterable);
        registry
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// The transform dispatcher.
///
/// Holds the [`Registry`] and decides whether and how to decorate a
/// [`Value`]: containers and paginated pages are rebuilt with every
/// element transformed recursively, eligible objects with a registered
/// (or overridden) presenter are wrapped in a bound [`Transformer`], and
/// everything else passes through unchanged. Transformation never fails
/// on opaque input.
///
/// A dispatcher is an explicit value passed by handle to every caller
/// that needs to transform data; there is no ambient or global registry.
/// Populate the registry during setup and treat it as read-only
/// afterwards.
///
/// # Examples
///
/// ```rust
/// use garnish::prelude::*;
///
/// #[derive(Clone, Presentable)]
/// struct Article {
///     title: String,
/// }
///
/// #[derive(Clone, Default)]
/// struct ArticlePresenter;
/// impl Presenter for ArticlePresenter {}
///
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.register_transformers(garnish::presenters! {
///     Article => ArticlePresenter,
/// });
///
/// let value = Value::from(vec![
///     Value::object(Article { title: "first".to_string() }),
///     Value::from("opaque"),
/// ]);
/// let transformed = dispatcher.transform(value);
/// let items = transformed.as_sequence().unwrap();
/// assert!(items[0].is_presented());
/// assert!(items[1].is_scalar());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Dispatcher {
    registry: Registry,
    max_depth: usize,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry and the default
    /// recursion cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the recursion-depth cap. Values nested deeper than this are
    /// returned undecorated.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The current recursion-depth cap.
    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Read access to the registry.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Merges a type-to-presenter mapping into the registry; later
    /// entries for an existing key overwrite. Chains.
    ///
    /// Registration performs no validation and no construction; presenter
    /// construction is deferred to dispatch time.
    pub fn register_transformers(
        &mut self,
        bindings: impl IntoIterator<Item = (TypeKey, TransformerBinding)>,
    ) -> &mut Self {
        let before = self.registry.len();
        self.registry.merge(bindings);
        debug!(
            merged = self.registry.len() - before,
            registered = self.registry.len(),
            "registered transformers"
        );
        self
    }

    /// Registers a single source-type-to-presenter pair. Chains.
    pub fn register<S, P>(&mut self) -> &mut Self
    where
        S: 'static,
        P: Presenter + Default + 'static,
    {
        self.register_transformers([(TypeKey::of::<S>(), TransformerBinding::of::<P>())])
    }

    /// Returns `true` if the value carries the presentable capability
    /// (the `Object` variant).
    #[must_use]
    pub const fn is_transformable(&self, value: &Value) -> bool {
        value.is_object()
    }

    /// Returns `true` if a transformer is registered under `key`.
    #[must_use]
    pub fn has_transformer_for(&self, key: TypeKey) -> bool {
        self.registry.contains(key)
    }

    /// Returns the override when supplied, else the binding registered
    /// under `key`.
    ///
    /// # Errors
    ///
    /// [`TransformerLookupError`] when neither is available. This is the
    /// documented failure path for callers that bypass the
    /// [`has_transformer_for`](Dispatcher::has_transformer_for) guard.
    pub fn lookup_transformer(
        &self,
        key: TypeKey,
        override_binding: Option<TransformerBinding>,
    ) -> Result<TransformerBinding, TransformerLookupError> {
        override_binding
            .or_else(|| self.registry.get(key).copied())
            .ok_or(TransformerLookupError {
                source_type: key.label(),
            })
    }

    /// Transforms a value using the registry alone.
    ///
    /// Containers and paginated pages are rebuilt with every element
    /// passed recursively through transform; eligible objects with a
    /// registered transformer are decorated (loaded relations included);
    /// everything else passes through unchanged.
    #[must_use]
    pub fn transform(&self, value: Value) -> Value {
        self.transform_with(value, None)
    }

    /// Transforms a value, decorating every eligible object with
    /// `override_binding` when supplied instead of its registered
    /// transformer. The override applies to all elements of a container.
    #[must_use]
    pub fn transform_with(
        &self,
        value: Value,
        override_binding: Option<TransformerBinding>,
    ) -> Value {
        self.transform_at(value, override_binding, 0)
    }

    /// Transforms a value, decorating every eligible object with
    /// presenter type `P` regardless of the registry.
    #[must_use]
    pub fn transform_using<P: Presenter + Default + 'static>(&self, value: Value) -> Value {
        self.transform_with(value, Some(TransformerBinding::of::<P>()))
    }

    fn transform_at(
        &self,
        value: Value,
        override_binding: Option<TransformerBinding>,
        depth: usize,
    ) -> Value {
        if depth > self.max_depth {
            warn!(
                max_depth = self.max_depth,
                "transform recursion truncated; returning value undecorated"
            );
            return value;
        }
        match value {
            Value::Sequence(items) => {
                trace!(len = items.len(), "transforming sequence");
                Value::Sequence(
                    items
                        .into_iter()
                        .map(|item| self.transform_at(item, override_binding, depth + 1))
                        .collect(),
                )
            }
            Value::Mapping(mapping) => {
                trace!(len = mapping.len(), "transforming mapping");
                Value::Mapping(
                    mapping
                        .into_iter()
                        .map(|(key, item)| {
                            (key, self.transform_at(item, override_binding, depth + 1))
                        })
                        .collect(),
                )
            }
            Value::Paginated(page) => {
                trace!(len = page.len(), "transforming paginated page");
                Value::Paginated(
                    page.map_items(|item| self.transform_at(item, override_binding, depth + 1)),
                )
            }
            Value::Object(object) => self.transform_object(object, override_binding, depth),
            opaque => opaque,
        }
    }

    fn transform_object(
        &self,
        object: Box<dyn Presentable>,
        override_binding: Option<TransformerBinding>,
        depth: usize,
    ) -> Value {
        let key = object.type_key();
        let Ok(binding) = self.lookup_transformer(key, override_binding) else {
            // Pass-through: presentable, but nothing registered and no
            // override supplied.
            return Value::Object(object);
        };

        let mut source = object.clone_presentable();
        // Loaded relations recurse through the registry alone; an
        // override never propagates into relations.
        for name in source.relation_names() {
            if let Some(related) = source.take_relation(&name) {
                source.put_relation(&name, self.transform_at(related, None, depth + 1));
            }
        }

        trace!(
            source = key.label(),
            presenter = binding.label(),
            "decorating object"
        );
        let mut transformer = Transformer::from_boxed(binding.instantiate());
        transformer.bind(source.as_ref());
        Value::Presented(transformer)
    }
}

/// Builds a transformer mapping from `SourceType => PresenterType` pairs,
/// ready to merge via
/// [`Dispatcher::register_transformers`].
///
/// This is the declarative configuration surface: a flat key/value list
/// of types, resolved to [`TypeKey`]/[`TransformerBinding`] pairs at the
/// call site.
///
/// # Examples
///
/// ```rust
/// use garnish::prelude::*;
///
/// #[derive(Clone, Presentable)]
/// struct Article {
///     title: String,
/// }
///
/// #[derive(Clone, Default)]
/// struct ArticlePresenter;
/// impl Presenter for ArticlePresenter {}
///
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.register_transformers(garnish::presenters! {
///     Article => ArticlePresenter,
/// });
/// assert_eq!(dispatcher.registry().len(), 1);
/// ```
#[macro_export]
macro_rules! presenters {
    () => {
        ::std::vec::Vec::<(
            $crate::present::TypeKey,
            $crate::present::TransformerBinding,
        )>::new()
    };
    ($($source:ty => $presenter:ty),+ $(,)?) => {
        ::std::vec![
            $(
                (
                    $crate::present::TypeKey::of::<$source>(),
                    $crate::present::TransformerBinding::of::<$presenter>(),
                )
            ),+
        ]
    };
}
