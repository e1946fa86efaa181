//! Property-based tests for the decoration layer.
//!
//! These properties pin the dispatcher and transformer contracts:
//!
//! 1. **Opaque identity**: scalars pass through transform unchanged.
//! 2. **Sequence structure**: length is preserved and element `i` of the
//!    result equals the transform of element `i` of the input.
//! 3. **Mapping structure**: the key set is preserved and values are
//!    transformed independently.
//! 4. **Pagination metadata**: page size, current page, and total count
//!    survive transformation.
//! 5. **Non-mutation**: the source object's fields are identical before
//!    and after transformation.
//! 6. **Computed precedence**: a computed field always wins over a
//!    stored field of the same name.

use std::any::Any;

use garnish::present::{Dispatcher, Presentable, Presenter, PresenterExt, TypeKey};
use garnish::value::{Mapping, Paginated, Value};
use proptest::prelude::*;

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Record {
    label: String,
    score: i64,
}

impl Presentable for Record {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn clone_presentable(&self) -> Box<dyn Presentable> {
        Box::new(self.clone())
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "label" => Some(Value::from(self.label.clone())),
            "score" => Some(Value::from(self.score)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn export(&self) -> Option<Mapping> {
        Some(garnish::mapping! {
            "label" => self.label.clone(),
            "score" => self.score,
        })
    }
}

#[derive(Clone, Default)]
struct RecordPresenter;

impl Presenter for RecordPresenter {
    fn computed_fields(&self) -> &'static [&'static str] {
        &["label"]
    }

    fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
        let record = source.as_any().downcast_ref::<Record>()?;
        match field {
            "label" => Some(Value::from(format!("computed:{}", record.label))),
            _ => None,
        }
    }
}

fn dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register::<Record, RecordPresenter>();
    dispatcher
}

fn record(label: &str, score: i64) -> Record {
    Record {
        label: label.to_string(),
        score,
    }
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::null()),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,16}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_scalar_passes_through_unchanged(scalar in scalar_strategy()) {
        let transformed = dispatcher().transform(scalar.clone());
        prop_assert_eq!(transformed, scalar);
    }

    #[test]
    fn prop_sequence_preserves_length_and_decorates_each_index(
        records in prop::collection::vec((".{0,8}", any::<i64>()), 0..8)
    ) {
        let dispatcher = dispatcher();
        let sequence = Value::Sequence(
            records
                .iter()
                .map(|(label, score)| Value::object(record(label, *score)))
                .collect(),
        );

        let transformed = dispatcher.transform(sequence);
        let items = transformed.into_sequence().expect("sequence survives");
        prop_assert_eq!(items.len(), records.len());

        for (item, (label, score)) in items.iter().zip(&records) {
            let expected = dispatcher.transform(Value::object(record(label, *score)));
            prop_assert_eq!(item, &expected);
            prop_assert!(item.is_presented());
        }
    }

    #[test]
    fn prop_mapping_preserves_keys_and_transforms_independently(
        entries in prop::collection::vec(("[a-z]{1,8}", any::<i64>(), any::<bool>()), 0..8)
    ) {
        let dispatcher = dispatcher();
        let mut mapping = Mapping::new();
        for (key, score, eligible) in &entries {
            if *eligible {
                mapping.insert(key.clone(), Value::object(record(key, *score)));
            } else {
                mapping.insert(key.clone(), Value::from(*score));
            }
        }
        let input_keys: Vec<String> = mapping.keys().map(String::from).collect();

        let transformed = dispatcher.transform(Value::Mapping(mapping.clone()));
        let result = transformed.into_mapping().expect("mapping survives");

        let result_keys: Vec<String> = result.keys().map(String::from).collect();
        prop_assert_eq!(result_keys, input_keys);

        for (key, item) in result.iter() {
            match mapping.get(key).expect("key preserved") {
                Value::Object(_) => prop_assert!(item.is_presented()),
                original => prop_assert_eq!(item, original),
            }
        }
    }

    #[test]
    fn prop_pagination_metadata_survives(
        labels in prop::collection::vec(".{0,8}", 0..6),
        total in any::<u64>(),
        per_page in any::<u64>(),
        current_page in any::<u64>(),
    ) {
        let page = Paginated::new(
            labels
                .iter()
                .map(|label| Value::object(record(label, 0)))
                .collect(),
            total,
            per_page,
            current_page,
        );

        let transformed = dispatcher().transform(Value::from(page));
        let result = transformed.into_paginated().expect("page survives");

        prop_assert_eq!(result.total(), total);
        prop_assert_eq!(result.per_page(), per_page);
        prop_assert_eq!(result.current_page(), current_page);
        prop_assert_eq!(result.len(), labels.len());
        prop_assert!(result.items().iter().all(Value::is_presented));
    }

    #[test]
    fn prop_transform_never_mutates_the_source(
        label in ".{0,16}",
        score in any::<i64>(),
    ) {
        let source = record(&label, score);
        let before = source.clone();

        let _ = dispatcher().transform(Value::object(source.clone()));

        prop_assert_eq!(source, before);
    }

    #[test]
    fn prop_computed_field_wins_over_stored(
        label in ".{0,16}",
        score in any::<i64>(),
    ) {
        let transformer = RecordPresenter::create(&record(&label, score));
        prop_assert_eq!(
            transformer.resolve_field("label"),
            Some(Value::from(format!("computed:{label}")))
        );
        prop_assert_eq!(
            transformer.resolve_field("score"),
            Some(Value::from(score))
        );
    }

    #[test]
    fn prop_unregistered_objects_pass_through(label in ".{0,16}") {
        #[derive(Clone)]
        struct Unregistered {
            label: String,
        }

        impl Presentable for Unregistered {
            fn type_key(&self) -> TypeKey {
                TypeKey::of::<Self>()
            }

            fn clone_presentable(&self) -> Box<dyn Presentable> {
                Box::new(self.clone())
            }

            fn field(&self, name: &str) -> Option<Value> {
                match name {
                    "label" => Some(Value::from(self.label.clone())),
                    _ => None,
                }
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let transformed = dispatcher().transform(Value::object(Unregistered {
            label: label.clone(),
        }));
        let object = transformed.as_object().expect("stays an object");
        prop_assert_eq!(object.field("label"), Some(Value::from(label)));
    }
}
