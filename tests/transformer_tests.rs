//! Unit tests for the Transformer bound view.
//!
//! A Transformer binds to a defensive clone of one presentable object and
//! resolves each field through a three-tier chain: computed field first,
//! stored field second, caller default last. Map-style writes are always
//! rejected.

use std::any::Any;

use garnish::present::{
    Presentable, Presenter, PresenterExt, Transformer, TypeKey, WriteOperation,
};
use garnish::value::{Mapping, Value};
use rstest::rstest;

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Song {
    title: String,
    seconds: u64,
}

impl Song {
    fn new(title: &str, seconds: u64) -> Self {
        Self {
            title: title.to_string(),
            seconds,
        }
    }
}

impl Presentable for Song {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn clone_presentable(&self) -> Box<dyn Presentable> {
        Box::new(self.clone())
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(Value::from(self.title.clone())),
            "seconds" => Some(Value::from(self.seconds)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn export(&self) -> Option<Mapping> {
        Some(garnish::mapping! {
            "title" => self.title.clone(),
            "seconds" => self.seconds,
        })
    }
}

/// Overrides the stored `title` and adds a computed `play_count`.
#[derive(Clone, Default)]
struct SongPresenter;

impl Presenter for SongPresenter {
    fn computed_fields(&self) -> &'static [&'static str] {
        &["title", "play_count", "nothing"]
    }

    fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
        let song = source.as_any().downcast_ref::<Song>()?;
        match field {
            "title" => Some(Value::from(song.title.to_uppercase())),
            "play_count" => Some(Value::from(1024)),
            // Declared but unresolved: must still win and yield null.
            _ => None,
        }
    }
}

/// Records the original (pre-clone) object handed to `boot`.
#[derive(Clone, Default)]
struct BootPresenter {
    seen_title: Option<String>,
}

impl Presenter for BootPresenter {
    fn boot(&mut self, original: &dyn Presentable) {
        self.seen_title = original
            .field("title")
            .and_then(|value| value.as_scalar().and_then(|scalar| scalar.as_str().map(String::from)));
    }

    fn computed_fields(&self) -> &'static [&'static str] {
        &["seen_title"]
    }

    fn computed(&self, field: &str, _source: &dyn Presentable) -> Option<Value> {
        match field {
            "seen_title" => Some(Value::from(self.seen_title.clone())),
            _ => None,
        }
    }
}

#[derive(Clone, Default)]
struct PassthroughPresenter;

impl Presenter for PassthroughPresenter {}

// =============================================================================
// Binding Lifecycle
// =============================================================================

#[rstest]
fn transformer_starts_unbound() {
    let transformer = Transformer::new(PassthroughPresenter);
    assert!(!transformer.is_bound());
    assert!(transformer.resolve_field("title").is_none());
    assert!(!transformer.has_field("title"));
    assert!(transformer.to_mapping().is_empty());
}

#[rstest]
fn bind_transitions_to_bound() {
    let mut transformer = Transformer::new(PassthroughPresenter);
    transformer.bind(&Song::new("Holiday", 212));
    assert!(transformer.is_bound());
}

#[rstest]
fn boot_receives_the_original_object() {
    let mut transformer = Transformer::new(BootPresenter::default());
    transformer.bind(&Song::new("Holiday", 212));
    assert_eq!(
        transformer.resolve_field("seen_title"),
        Some(Value::from("Holiday"))
    );
}

#[rstest]
fn bind_clones_defensively() {
    let mut song = Song::new("Holiday", 212);
    let mut transformer = Transformer::new(PassthroughPresenter);
    transformer.bind(&song);

    // Mutating the original after binding must not leak into the view.
    song.title = "Basket Case".to_string();
    assert_eq!(
        transformer.resolve_field("title"),
        Some(Value::from("Holiday"))
    );
}

#[rstest]
fn bind_never_mutates_the_original() {
    let song = Song::new("Holiday", 212);
    let before = song.clone();

    let mut transformer = Transformer::new(SongPresenter);
    transformer.bind(&song);
    let _ = transformer.to_mapping();

    assert_eq!(song, before);
}

#[rstest]
fn rebinding_discards_the_prior_snapshot() {
    let mut transformer = Transformer::new(PassthroughPresenter);
    transformer.bind(&Song::new("Holiday", 212));
    transformer.bind(&Song::new("Longview", 235));

    assert_eq!(
        transformer.resolve_field("title"),
        Some(Value::from("Longview"))
    );
    assert_eq!(
        transformer.resolve_field("seconds"),
        Some(Value::from(235u64))
    );
}

#[rstest]
fn create_is_new_then_bind() {
    let song = Song::new("Holiday", 212);
    let transformer = SongPresenter::create(&song);
    assert!(transformer.is_bound());
    assert_eq!(
        transformer.resolve_field("play_count"),
        Some(Value::from(1024))
    );
}

// =============================================================================
// Field Resolution
// =============================================================================

#[rstest]
fn computed_field_wins_over_stored_field() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(
        transformer.resolve_field("title"),
        Some(Value::from("HOLIDAY"))
    );
}

#[rstest]
fn stored_field_resolves_without_override() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(
        transformer.resolve_field("seconds"),
        Some(Value::from(212u64))
    );
}

#[rstest]
fn unknown_field_resolves_to_none() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert!(transformer.resolve_field("album").is_none());
}

#[rstest]
fn declared_computed_without_result_yields_null() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(transformer.resolve_field("nothing"), Some(Value::null()));
}

#[rstest]
fn camel_case_request_resolves_snake_case_computed() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(
        transformer.resolve_field("playCount"),
        Some(Value::from(1024))
    );
}

#[rstest]
fn resolve_field_or_uses_default_for_unknown_keys() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(
        transformer.resolve_field_or("album", Value::from("unknown")),
        Value::from("unknown")
    );
    assert_eq!(
        transformer.resolve_field_or("seconds", Value::from(0)),
        Value::from(212u64)
    );
}

#[rstest]
fn resolve_field_or_else_defers_the_default() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    let value = transformer.resolve_field_or_else("seconds", || {
        unreachable!("default must not be evaluated when the chain resolves")
    });
    assert_eq!(value, Value::from(212u64));
}

#[rstest]
fn has_field_ignores_computed_overrides() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert!(transformer.has_field("title"));
    assert!(transformer.has_field("seconds"));
    assert!(!transformer.has_field("play_count"));
}

#[rstest]
fn has_computed_checks_without_invoking() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert!(transformer.has_computed("title"));
    assert!(transformer.has_computed("play_count"));
    assert!(transformer.has_computed("playCount"));
    assert!(!transformer.has_computed("seconds"));
}

// =============================================================================
// Map-Style Access
// =============================================================================

#[rstest]
fn get_and_has_delegate_to_resolution() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(transformer.get("title"), Some(Value::from("HOLIDAY")));
    assert!(transformer.has("seconds"));
    assert!(!transformer.has("album"));
}

#[rstest]
#[case("title")]
#[case("seconds")]
#[case("anything_else")]
fn set_is_always_rejected(#[case] key: &str) {
    let mut transformer = SongPresenter::create(&Song::new("Holiday", 212));
    let error = transformer
        .set(key, Value::from("new value"))
        .expect_err("set must be rejected");
    assert_eq!(error.operation, WriteOperation::Set);
    assert_eq!(error.key, key);
}

#[rstest]
#[case("title")]
#[case("anything_else")]
fn unset_is_always_rejected(#[case] key: &str) {
    let mut transformer = SongPresenter::create(&Song::new("Holiday", 212));
    let error = transformer.unset(key).expect_err("unset must be rejected");
    assert_eq!(error.operation, WriteOperation::Unset);
    assert_eq!(error.key, key);
}

// =============================================================================
// Serialization
// =============================================================================

#[rstest]
fn to_mapping_resolves_every_exported_key() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    let mapping = transformer.to_mapping();

    let keys: Vec<&str> = mapping.keys().collect();
    assert_eq!(keys, vec!["title", "seconds"]);
    // The computed override participates in serialization.
    assert_eq!(mapping.get("title"), Some(&Value::from("HOLIDAY")));
    assert_eq!(mapping.get("seconds"), Some(&Value::from(212u64)));
}

#[rstest]
fn to_mapping_is_empty_without_export_capability() {
    #[derive(Clone)]
    struct Opaque;

    impl Presentable for Opaque {
        fn type_key(&self) -> TypeKey {
            TypeKey::of::<Self>()
        }

        fn clone_presentable(&self) -> Box<dyn Presentable> {
            Box::new(Self)
        }

        fn field(&self, _name: &str) -> Option<Value> {
            None
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let transformer = PassthroughPresenter::create(&Opaque);
    assert!(transformer.to_mapping().is_empty());
}

#[rstest]
fn to_text_is_canonical_json() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(
        transformer.to_text(),
        r#"{"seconds":212,"title":"HOLIDAY"}"#
    );
}

#[rstest]
fn display_matches_to_text() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert_eq!(format!("{transformer}"), transformer.to_text());
}

#[rstest]
fn serde_serialization_matches_to_json() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    let serialized = serde_json::to_value(&transformer).expect("serialization must succeed");
    assert_eq!(serialized, transformer.to_json());
}

#[rstest]
fn snapshot_exposes_the_bound_clone() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    let snapshot = transformer.snapshot().expect("transformer is bound");
    assert_eq!(snapshot.type_key(), TypeKey::of::<Song>());
    let song = snapshot
        .as_any()
        .downcast_ref::<Song>()
        .expect("snapshot is a Song");
    assert_eq!(song.title, "Holiday");
}

#[rstest]
fn presenter_label_names_the_driving_presenter() {
    let transformer = SongPresenter::create(&Song::new("Holiday", 212));
    assert!(transformer.presenter_label().ends_with("SongPresenter"));
}
