//! Presenters and the read-only transformer bound to one object.

use std::fmt;

use crate::present::error::{ImmutableWriteError, WriteOperation};
use crate::present::presentable::Presentable;
use crate::value::{Mapping, Value};

// =============================================================================
// Presenter
// =============================================================================

/// Clone and labelling support for boxed presenters.
///
/// Blanket-implemented for every `Presenter + Clone`; user code never
/// implements this directly.
pub trait PresenterClone {
    /// Returns a boxed clone of this presenter.
    fn clone_presenter(&self) -> Box<dyn Presenter>;

    /// The presenter's type name, for diagnostics.
    fn label(&self) -> &'static str;
}

impl<P> PresenterClone for P
where
    P: Presenter + Clone + 'static,
{
    fn clone_presenter(&self) -> Box<dyn Presenter> {
        Box::new(self.clone())
    }

    fn label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl Clone for Box<dyn Presenter> {
    fn clone(&self) -> Self {
        self.clone_presenter()
    }
}

/// A presenter: the user-implemented half of a [`Transformer`].
///
/// A presenter declares computed fields that shadow same-named stored
/// fields of the bound object, and may hook into the bind lifecycle. All
/// three methods have defaults, so the minimal presenter is an empty
/// impl, which decorates an object without overriding anything.
///
/// Panics or errors raised inside [`computed`](Presenter::computed) or
/// [`boot`](Presenter::boot) propagate unchanged to the caller; the
/// library never swallows them.
///
/// # Examples
///
/// ```rust
/// use garnish::prelude::*;
///
/// #[derive(Clone, Presentable)]
/// struct Track {
///     title: String,
///     seconds: u64,
/// }
///
/// #[derive(Clone, Default)]
/// struct TrackPresenter;
///
/// impl Presenter for TrackPresenter {
///     fn computed_fields(&self) -> &'static [&'static str] {
///         &["duration"]
///     }
///
///     fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
///         let track = source.as_any().downcast_ref::<Track>()?;
///         match field {
///             "duration" => Some(Value::from(track.seconds / 60)),
///             _ => None,
///         }
///     }
/// }
///
/// let track = Track { title: "Holiday".to_string(), seconds: 212 };
/// let transformer = TrackPresenter::create(&track);
/// assert_eq!(transformer.get("duration"), Some(Value::from(3u64)));
/// ```
pub trait Presenter: PresenterClone {
    /// Lifecycle hook invoked by [`Transformer::bind`] with the original
    /// (pre-clone) object. Default: no-op.
    fn boot(&mut self, original: &dyn Presentable) {
        let _ = original;
    }

    /// The names of this presenter's computed fields. Checked, never
    /// invoked, by [`Transformer::has_computed`].
    fn computed_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Resolves the computed field named `field` against the bound
    /// snapshot. `field` is always one of
    /// [`computed_fields`](Presenter::computed_fields).
    ///
    /// Returning `None` for a declared field still wins over a stored
    /// field of the same name; it resolves to null.
    fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
        let _ = (field, source);
        None
    }
}

/// Convenience constructors for presenters.
pub trait PresenterExt: Presenter + Default + Sized + 'static {
    /// Creates a new presenter instance and binds it to `object` in one
    /// step: "new instance, then bind".
    #[must_use]
    fn create(object: &dyn Presentable) -> Transformer {
        let mut transformer = Transformer::new(Self::default());
        transformer.bind(object);
        transformer
    }
}

impl<P: Presenter + Default + 'static> PresenterExt for P {}

// =============================================================================
// Transformer
// =============================================================================

/// A read-only view over a defensive clone of one presentable object.
///
/// A transformer has exactly two states. **Unbound**: constructed but
/// holding no snapshot; all reads resolve to `None`, `false`, or empty.
/// **Bound**: a snapshot is held and all read operations are defined.
/// [`bind`](Transformer::bind) is the only unbound-to-bound transition;
/// binding an already-bound transformer discards the prior snapshot.
///
/// Field resolution walks a three-tier chain: a computed field declared
/// by the presenter wins, then the snapshot's stored field, then the
/// caller-supplied default. Map-style writes are always rejected —
/// presenters are contractually read-only views.
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
/// let article = Article { title: "On decorators".to_string() };
/// let transformer = ArticlePresenter::create(&article);
///
/// assert!(transformer.is_bound());
/// assert_eq!(transformer.get("title"), Some(Value::from("On decorators")));
/// assert!(transformer.get("missing").is_none());
/// ```
pub struct Transformer {
    presenter: Box<dyn Presenter>,
    snapshot: Option<Box<dyn Presentable>>,
}

impl Transformer {
    /// Creates an unbound transformer driven by `presenter`.
    #[must_use]
    pub fn new(presenter: impl Presenter + 'static) -> Self {
        Self {
            presenter: Box::new(presenter),
            snapshot: None,
        }
    }

    /// Creates an unbound transformer from an already-boxed presenter.
    #[must_use]
    pub const fn from_boxed(presenter: Box<dyn Presenter>) -> Self {
        Self {
            presenter,
            snapshot: None,
        }
    }

    /// Returns `true` once a snapshot is held.
    #[inline]
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Binds this transformer to a defensive clone of `object`,
    /// discarding any prior snapshot, then invokes the presenter's
    /// [`boot`](Presenter::boot) hook with the original (pre-clone)
    /// object. Chains.
    pub fn bind(&mut self, object: &dyn Presentable) -> &mut Self {
        self.snapshot = Some(object.clone_presentable());
        self.presenter.boot(object);
        self
    }

    /// Resolves the field named `key` through the three-tier chain:
    ///
    /// 1. a computed field declared by the presenter, matched by exact
    ///    name or by snake_case normalization of `key` (a computed `None`
    ///    resolves to null — the method still wins);
    /// 2. the snapshot's stored field, evaluated on access;
    /// 3. `None`.
    ///
    /// Always `None` on an unbound transformer.
    #[must_use]
    pub fn resolve_field(&self, key: &str) -> Option<Value> {
        let snapshot = self.snapshot.as_deref()?;
        if let Some(field) = self.computed_name(key) {
            return Some(
                self.presenter
                    .computed(field, snapshot)
                    .unwrap_or_else(Value::null),
            );
        }
        snapshot.field(key)
    }

    /// Like [`resolve_field`](Transformer::resolve_field), but falls back
    /// to `default` instead of `None`.
    #[must_use]
    pub fn resolve_field_or(&self, key: &str, default: Value) -> Value {
        self.resolve_field(key).unwrap_or(default)
    }

    /// Like [`resolve_field`](Transformer::resolve_field), but lazily
    /// evaluates the fallback only when the chain yields nothing.
    #[must_use]
    pub fn resolve_field_or_else(&self, key: &str, default: impl FnOnce() -> Value) -> Value {
        self.resolve_field(key).unwrap_or_else(default)
    }

    /// Returns `true` if the snapshot has a stored field named `key`,
    /// regardless of whether a computed override exists. Always `false`
    /// on an unbound transformer.
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.snapshot
            .as_deref()
            .is_some_and(|snapshot| snapshot.has_field(key))
    }

    /// Returns `true` if the presenter declares a computed field for
    /// `key` (exact or snake_case-normalized), checked without invoking.
    #[must_use]
    pub fn has_computed(&self, key: &str) -> bool {
        self.computed_name(key).is_some()
    }

    /// Map-style read: alias for
    /// [`resolve_field`](Transformer::resolve_field).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.resolve_field(key)
    }

    /// Map-style membership: alias for
    /// [`has_field`](Transformer::has_field).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.has_field(key)
    }

    /// Map-style write. Always rejected: presenters are read-only views.
    ///
    /// # Errors
    ///
    /// Always returns [`ImmutableWriteError`].
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ImmutableWriteError> {
        let _ = value;
        Err(ImmutableWriteError {
            operation: WriteOperation::Set,
            key: key.to_string(),
        })
    }

    /// Map-style delete. Always rejected: presenters are read-only views.
    ///
    /// # Errors
    ///
    /// Always returns [`ImmutableWriteError`].
    pub fn unset(&mut self, key: &str) -> Result<(), ImmutableWriteError> {
        Err(ImmutableWriteError {
            operation: WriteOperation::Unset,
            key: key.to_string(),
        })
    }

    /// Serializes through the snapshot's exportable capability: takes the
    /// exported key set in order and resolves every key through the same
    /// computed-first chain, so computed overrides participate in
    /// serialization. Empty when unbound or when the snapshot is not
    /// array-exportable.
    #[must_use]
    pub fn to_mapping(&self) -> Mapping {
        let Some(exported) = self.snapshot.as_deref().and_then(Presentable::export) else {
            return Mapping::new();
        };
        let mut mapping = Mapping::with_capacity(exported.len());
        for key in exported.keys() {
            mapping.insert(key, self.resolve_field(key).unwrap_or_else(Value::null));
        }
        mapping
    }

    /// Projects [`to_mapping`](Transformer::to_mapping) to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.to_mapping().to_json()
    }

    /// Canonical JSON text of [`to_mapping`](Transformer::to_mapping);
    /// also the `Display` form.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_json().to_string()
    }

    /// Read access to the bound snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<&dyn Presentable> {
        self.snapshot.as_deref()
    }

    /// The driving presenter's type name, for diagnostics.
    #[must_use]
    pub fn presenter_label(&self) -> &'static str {
        self.presenter.label()
    }

    fn computed_name(&self, key: &str) -> Option<&'static str> {
        let fields = self.presenter.computed_fields();
        if let Some(field) = fields.iter().copied().find(|field| *field == key) {
            return Some(field);
        }
        let normalized = snake_case(key);
        fields.iter().copied().find(|field| *field == normalized)
    }
}

impl Clone for Transformer {
    fn clone(&self) -> Self {
        Self {
            presenter: self.presenter.clone(),
            snapshot: self
                .snapshot
                .as_deref()
                .map(Presentable::clone_presentable),
        }
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Transformer")
            .field("presenter", &self.presenter.label())
            .field(
                "snapshot",
                &self.snapshot.as_deref().map(|snapshot| snapshot.type_key()),
            )
            .finish()
    }
}

impl fmt::Display for Transformer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.to_text())
    }
}

impl serde::Serialize for Transformer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Normalizes a requested field name to snake_case, so `createdAt`,
/// `created-at`, and `created at` all resolve a computed field declared
/// as `created_at`.
fn snake_case(key: &str) -> String {
    let mut normalized = String::with_capacity(key.len());
    for character in key.chars() {
        if character.is_uppercase() {
            if !normalized.is_empty() && !normalized.ends_with('_') {
                normalized.push('_');
            }
            normalized.extend(character.to_lowercase());
        } else if character == '-' || character == ' ' {
            normalized.push('_');
        } else {
            normalized.push(character);
        }
    }
    normalized
}
