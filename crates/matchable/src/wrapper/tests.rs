use super::*;
use matchable_types::{ObjectValue, TypeDef};
use pretty_assertions::assert_eq;

fn concat() -> Wrapper {
    Wrapper::custom("concat", |lhs, rhs| {
        let mut items = lhs.as_list()?.to_vec();
        items.extend(rhs.as_list()?.iter().cloned());
        Some(Value::list(items))
    })
}

#[test]
fn replace_keeps_rhs() {
    let lhs = Wrapper::Replace.wrap(Value::int(1));
    let rhs = Wrapper::Replace.wrap(Value::int(2));
    assert_eq!(lhs.combine(&rhs), rhs);
}

#[test]
fn update_merges_dicts_keywise() {
    let lhs = Wrapper::Update.wrap(Value::dict([("a", 1), ("shared", 1)]));
    let rhs = Wrapper::Update.wrap(Value::dict([("b", 2), ("shared", 2)]));
    let merged = lhs.combine(&rhs);
    assert_eq!(
        merged.value(),
        &Value::dict([("a", 1), ("shared", 2), ("b", 2)])
    );
    assert_eq!(merged.wrapper(), &Wrapper::Update);
    // The left operand is copied, not mutated.
    assert_eq!(lhs.value(), &Value::dict([("a", 1), ("shared", 1)]));
}

#[test]
fn update_unions_sets() {
    let lhs = Wrapper::Update.wrap(Value::set(["first"]));
    let rhs = Wrapper::Update.wrap(Value::set(["second"]));
    assert_eq!(lhs.combine(&rhs).into_value(), Value::set(["first", "second"]));

    // A list resolves to replace, so it wins over the set.
    let list = Wrapper::Replace.wrap(Value::list(["third"]));
    assert_eq!(lhs.combine(&list).into_value(), Value::list(["third"]));
}

#[test]
fn update_yields_to_explicit_replace() {
    let lhs = Wrapper::Update.wrap(Value::set(["first"]));
    let rhs = Wrapper::Replace.wrap(Value::set(["second"]));
    assert_eq!(lhs.combine(&rhs).into_value(), Value::set(["second"]));
}

#[test]
fn impossible_update_falls_back_to_rhs() {
    let lhs = Wrapper::Update.wrap(Value::dict(Vec::<(Value, Value)>::new()));
    let rhs = Wrapper::Update.wrap(Value::set([1]));
    assert_eq!(lhs.combine(&rhs), rhs);
}

#[test]
fn dict_subtype_instances_update_through_payload() {
    let payload = Value::dict([("key", 0)]);
    let lhs = Wrapper::Update.wrap(Value::object(
        ObjectValue::new(TypeId::DICT).with_payload(payload),
    ));
    let rhs = Wrapper::Update.wrap(Value::dict([("extra", 1)]));
    assert_eq!(
        lhs.combine(&rhs).into_value(),
        Value::dict([("key", 0), ("extra", 1)])
    );
}

#[test]
fn custom_combines_or_defers() {
    let lhs = concat().wrap(Value::list([0, 1]));
    let rhs = Wrapper::Replace.wrap(Value::list([2, 3]));
    let merged = lhs.combine(&rhs);
    assert_eq!(merged.value(), &Value::list([0, 1, 2, 3]));
    assert!(matches!(merged.wrapper(), Wrapper::Custom(custom) if custom.name() == "concat"));

    let not_a_list = Wrapper::Replace.wrap(Value::int(4));
    assert_eq!(lhs.combine(&not_a_list), not_a_list);
}

#[test]
fn builtin_entries() {
    let registry = WrapperRegistry::new();
    assert_eq!(registry.get(TypeId::OBJECT), Some(&Wrapper::Replace));
    assert_eq!(registry.get(TypeId::DICT), Some(&Wrapper::Update));
    assert_eq!(registry.get(TypeId::SET), Some(&Wrapper::Update));
    assert_eq!(registry.get(TypeId::LIST), None);
}

#[test]
fn resolve_walks_the_mro() {
    let mut types = TypeRegistry::new();
    let my_dict = types
        .define(TypeDef::new("MyDict").base(TypeId::DICT))
        .unwrap();
    let registry = WrapperRegistry::new();

    assert_eq!(registry.resolve(&types, &Value::int(1)), Wrapper::Replace);
    assert_eq!(
        registry.resolve(&types, &Value::dict([("a", 1)])),
        Wrapper::Update
    );
    let instance = Value::object(ObjectValue::new(my_dict));
    assert_eq!(registry.resolve(&types, &instance), Wrapper::Update);
}

#[test]
fn register_overrides_and_unregister_restores() {
    let types = TypeRegistry::new();
    let mut registry = WrapperRegistry::new();
    let list = Value::list([1]);
    let wrapper = concat();

    assert_eq!(registry.register(TypeId::LIST, wrapper.clone()), None);
    assert_eq!(registry.resolve(&types, &list), wrapper);

    assert_eq!(registry.unregister(TypeId::LIST), Some(wrapper));
    assert_eq!(registry.resolve(&types, &list), Wrapper::Replace);
}

#[test]
fn unknown_types_resolve_to_replace() {
    let types = TypeRegistry::new();
    let registry = WrapperRegistry::new();
    let ghost = Value::object(ObjectValue::new(TypeId::from_raw(4242)));
    assert_eq!(registry.resolve(&types, &ghost), Wrapper::Replace);
}

#[test]
fn custom_wrappers_compare_by_function() {
    let a = concat();
    assert_eq!(a, a.clone());
    assert_ne!(a, concat());
    assert_eq!(format!("{a:?}"), "Custom(Custom(concat))");
}
