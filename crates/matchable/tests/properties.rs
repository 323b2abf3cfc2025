//! Property-based tests for matching.
//!
//! Random linear hierarchies and random bindings check the invariants that
//! hold for every spec:
//! 1. A lone type binding matches every instance of the type or a subtype
//! 2. Objects outside every bound type never match
//! 3. Applicable attribute patterns combine in insertion order

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use matchable::{
    MatchError, ObjectValue, Pattern, Precedence, Spec, TypeDef, TypeId, TypeRegistry, Value,
    WrapperRegistry,
};
use proptest::prelude::*;

// -- Strategies --

/// A chain `T0 <: object`, `T1 <: T0`, ... of `depth` user types.
fn chain(depth: usize) -> (TypeRegistry, Vec<TypeId>) {
    let mut types = TypeRegistry::new();
    let mut chain: Vec<TypeId> = Vec::with_capacity(depth);
    for level in 0..depth {
        let mut def = TypeDef::new(format!("T{level}"));
        if let Some(&parent) = chain.last() {
            def = def.base(parent);
        }
        chain.push(types.define(def).unwrap());
    }
    (types, chain)
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,8}".prop_map(Value::from),
        Just(Value::None),
    ]
}

// -- Properties --

proptest! {
    #[test]
    fn lone_type_binding_matches_every_descendant(
        depth in 1usize..6,
        bound in 0usize..6,
        instance in 0usize..6,
        value in scalar(),
    ) {
        let (types, chain) = chain(depth);
        let bound = chain[bound % depth];
        let instance = chain[instance % depth];
        prop_assume!(types.is_subtype(instance, bound));

        let spec = Spec::from_bindings(&types, [(bound, value.clone())]).unwrap();
        let obj = Value::object(ObjectValue::new(instance));
        prop_assert_eq!(spec.match_value(&types, &obj).unwrap(), value.clone());
        prop_assert_eq!(
            spec.match_with(&types, &obj, Precedence::Typewise).unwrap(),
            value
        );
    }

    #[test]
    fn unrelated_objects_never_match(
        depth in 2usize..6,
        split in 1usize..5,
        value in scalar(),
    ) {
        let (types, chain) = chain(depth);
        let split = split % (depth - 1) + 1;
        // Bind only the deeper half; instances of the shallower half lack
        // every bound type in their ancestry.
        let spec = Spec::from_bindings(
            &types,
            chain[split..].iter().map(|&ty| (ty, value.clone())),
        )
        .unwrap();

        for &ty in &chain[..split] {
            let obj = Value::object(ObjectValue::new(ty).with_attr("x", 1));
            let err = spec.match_value(&types, &obj).unwrap_err();
            prop_assert_eq!(err, MatchError::NoMatch { object: obj });
        }
    }

    #[test]
    fn attribute_patterns_fold_in_insertion_order(
        thresholds in prop::collection::vec(-50i64..50, 1..8),
        x in -50i64..50,
    ) {
        let types = TypeRegistry::new();
        let wrappers = WrapperRegistry::new();
        let spec = Spec::builder(&types)
            .wrappers(&wrappers)
            .extend(thresholds.iter().enumerate().map(|(i, &t)| {
                let pattern = Pattern::for_type(TypeId::DICT).item("x").le(t).unwrap();
                (pattern, Value::dict([(format!("k{i}"), i64::try_from(i).unwrap())]))
            }))
            .build()
            .unwrap();

        let obj = Value::dict([("x", x)]);
        let expected: Vec<(String, i64)> = thresholds
            .iter()
            .enumerate()
            .filter(|&(_, &t)| x <= t)
            .map(|(i, _)| (format!("k{i}"), i64::try_from(i).unwrap()))
            .collect();

        match spec.match_value(&types, &obj) {
            Ok(matched) => prop_assert_eq!(matched, Value::dict(expected)),
            Err(err) => {
                prop_assert!(expected.is_empty());
                prop_assert_eq!(err, MatchError::NoMatch { object: obj.clone() });
            }
        }

        let order: Vec<usize> = spec
            .applicable(&types, &obj, Precedence::AttributesLast)
            .unwrap()
            .into_iter()
            .map(|pattern| spec.iter().position(|(bound, _)| bound == pattern).unwrap())
            .collect();
        prop_assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
