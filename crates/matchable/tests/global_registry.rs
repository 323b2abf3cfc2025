//! Process-wide wrapper registry.
//!
//! Kept in its own test binary: registering on the global instance would
//! race with any other test building specs through `Spec::from_bindings`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use matchable::{Spec, TypeId, TypeRegistry, Value, Wrapper, WrapperRegistry};
use pretty_assertions::assert_eq;

#[test]
fn specs_snapshot_the_global_registry() {
    let types = TypeRegistry::new();
    let bindings = || {
        [
            (TypeId::OBJECT, Value::list([0, 1])),
            (TypeId::INT, Value::list([2, 3])),
        ]
    };
    let zero = Value::int(0);

    let before = Spec::from_bindings(&types, bindings()).unwrap();
    assert_eq!(before.match_value(&types, &zero).unwrap(), Value::list([2, 3]));

    let previous = WrapperRegistry::global().write().register(
        TypeId::LIST,
        Wrapper::custom("concat", |lhs, rhs| {
            let mut items = lhs.as_list()?.to_vec();
            items.extend_from_slice(rhs.as_list()?);
            Some(Value::list(items))
        }),
    );
    assert_eq!(previous, None);

    let after = Spec::from_bindings(&types, bindings()).unwrap();
    assert_eq!(
        after.match_value(&types, &zero).unwrap(),
        Value::list([0, 1, 2, 3])
    );
    assert_eq!(before.match_value(&types, &zero).unwrap(), Value::list([2, 3]));

    WrapperRegistry::global().write().unregister(TypeId::LIST);
    let restored = Spec::from_bindings(&types, bindings()).unwrap();
    assert_eq!(restored.match_value(&types, &zero).unwrap(), Value::list([2, 3]));
    assert!(matches!(after.wrapper(after.iter().next().unwrap().0), Some(Wrapper::Custom(_))));
}
