//! Property-based tests for schema building, validation and projection.

use std::collections::BTreeSet;

use buildings_fields::{
    project, validate, FieldKind, FieldSpec, FieldValue, FieldsError, Schema, ValueMap,
};
use proptest::prelude::*;

// Generators for test data

/// Lowercase keys; unknown keys are generated uppercase so they never collide
fn field_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}").expect("valid regex for field keys")
}

fn unknown_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z]{0,5}").expect("valid regex for unknown keys")
}

fn option_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{0,6}").expect("valid regex for options")
}

fn field_spec(key: String) -> impl Strategy<Value = FieldSpec> {
    prop_oneof![
        Just(FieldSpec::number(key.clone())),
        Just(FieldSpec::freeform(key.clone())),
        prop::collection::vec(option_value(), 1..5)
            .prop_map(move |options| FieldSpec::enumeration(key.clone(), options)),
    ]
}

fn field_specs() -> impl Strategy<Value = Vec<FieldSpec>> {
    prop::collection::btree_set(field_key(), 0..6).prop_flat_map(|keys| {
        keys.into_iter()
            .map(field_spec)
            .collect::<Vec<_>>()
    })
}

fn scalar() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::from),
        any::<i64>().prop_map(FieldValue::from),
        (-1.0e6f64..1.0e6).prop_map(FieldValue::from),
        "[a-zA-Z0-9 .]{0,8}".prop_map(FieldValue::from),
    ]
}

/// A value the descriptor accepts
fn well_typed(spec: &FieldSpec, pick: usize) -> FieldValue {
    match &spec.type_ {
        FieldKind::Number => FieldValue::from(pick as i64),
        FieldKind::Freeform => FieldValue::from(format!("text {pick}")),
        FieldKind::Enum => {
            let options = spec.options.as_deref().unwrap_or_default();
            FieldValue::from(options[pick % options.len()].clone())
        }
        FieldKind::Unsupported(_) => FieldValue::Null,
    }
}

proptest! {
    /// Property: any repeated key makes the schema malformed
    #[test]
    fn prop_duplicate_keys_are_malformed(
        specs in field_specs().prop_filter("need a field", |s| !s.is_empty()),
        dup_index in any::<prop::sample::Index>(),
    ) {
        let existing = dup_index.get(&specs).clone();
        let mut with_dup = specs.clone();
        with_dup.push(FieldSpec::freeform(existing.key.clone()));

        let err = Schema::build(with_dup).unwrap_err();
        prop_assert_eq!(err, FieldsError::duplicate_key(&existing.key));
    }

    /// Property: an enum with no options anywhere in the list is malformed
    #[test]
    fn prop_empty_enum_is_malformed(
        specs in field_specs(),
        key in unknown_key(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut specs = specs;
        let pos = at.index(specs.len() + 1);
        specs.insert(pos, FieldSpec::enumeration(key, Vec::<String>::new()));
        let is_malformed = matches!(Schema::build(specs), Err(FieldsError::MalformedSchema { .. }));
        prop_assert!(is_malformed);
    }

    /// Property: projecting a projection again changes nothing
    #[test]
    fn prop_reprojection_is_idempotent(
        specs in field_specs(),
        raw in prop::collection::vec((field_key(), scalar()), 0..8),
    ) {
        let schema = Schema::build(specs).unwrap();
        let values: ValueMap = raw.into_iter().collect();

        let first = project(&schema, &values);
        let second = project(&schema, &first.clone().into_value_map());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.keys().collect::<Vec<_>>(), schema.keys().collect::<Vec<_>>());
    }

    /// Property: unknown keys are the only thing reported when present
    #[test]
    fn prop_unknown_keys_take_precedence(
        specs in field_specs(),
        unknown in prop::collection::btree_set(unknown_key(), 1..4),
        value in scalar(),
    ) {
        let schema = Schema::build(specs).unwrap();
        // Every known key gets a bool, which no supported type accepts
        let mut values: ValueMap = schema.keys().map(|k| (k.to_string(), true)).collect();
        for key in &unknown {
            values.insert(key.clone(), value.clone());
        }

        let expected = format!(
            "contains unknown keys: {}",
            unknown.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        prop_assert_eq!(validate(&schema, &values).messages(), vec![expected]);
    }

    /// Property: with only known keys, each mistyped key yields one violation
    #[test]
    fn prop_type_violations_accumulate(
        specs in field_specs(),
        mistyped in prop::collection::vec(any::<bool>(), 6),
        pick in 0usize..16,
    ) {
        let schema = Schema::build(specs.clone()).unwrap();
        let mut values = ValueMap::new();
        let mut expected_keys = BTreeSet::new();
        for (spec, bad) in specs.iter().zip(&mistyped) {
            if *bad {
                values.insert(spec.key.clone(), false);
                expected_keys.insert(spec.key.clone());
            } else {
                values.insert(spec.key.clone(), well_typed(spec, pick));
            }
        }

        let result = validate(&schema, &values);
        let reported: BTreeSet<String> = result
            .violations()
            .iter()
            .filter_map(|v| v.key().map(str::to_string))
            .collect();
        prop_assert_eq!(result.violations().len(), expected_keys.len());
        prop_assert_eq!(reported, expected_keys);
    }

    /// Property: null-valued declared keys are valid whatever their type
    #[test]
    fn prop_nulls_are_always_valid(specs in field_specs()) {
        let schema = Schema::build(specs).unwrap();
        let values: ValueMap = schema.keys().map(|k| (k.to_string(), FieldValue::Null)).collect();
        prop_assert!(validate(&schema, &values).is_valid());
    }

    /// Property: an undeclared key is unknown even when its value is null
    #[test]
    fn prop_null_undeclared_keys_are_unknown(
        specs in field_specs(),
        extra in prop::collection::btree_set(unknown_key(), 1..3),
    ) {
        let schema = Schema::build(specs).unwrap();
        let mut values: ValueMap = schema.keys().map(|k| (k.to_string(), FieldValue::Null)).collect();
        for key in &extra {
            values.insert(key.clone(), FieldValue::Null);
        }
        let expected = format!(
            "contains unknown keys: {}",
            extra.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        prop_assert_eq!(validate(&schema, &values).messages(), vec![expected]);
    }
}
