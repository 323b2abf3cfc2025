use super::*;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

const OBJECT: TypeId = TypeId::OBJECT;

fn lookup(mros: &FxHashMap<TypeId, Mro>) -> impl Fn(TypeId) -> Option<Mro> + '_ {
    move |ty| mros.get(&ty).cloned()
}

fn define(mros: &mut FxHashMap<TypeId, Mro>, ty: TypeId, bases: &[TypeId]) -> Mro {
    let mro = linearize(ty, bases, lookup(mros)).unwrap();
    mros.insert(ty, mro.clone());
    mro
}

fn root() -> FxHashMap<TypeId, Mro> {
    let mut mros = FxHashMap::default();
    mros.insert(OBJECT, smallvec::smallvec![OBJECT]);
    mros
}

#[test]
fn object_has_itself_only() {
    let mro = linearize(OBJECT, &[], |_| None).unwrap();
    assert_eq!(mro.as_slice(), &[OBJECT]);
}

#[test]
fn single_inheritance_chain() {
    let (a, b, c) = (TypeId::from_raw(100), TypeId::from_raw(101), TypeId::from_raw(102));
    let mut mros = root();

    assert_eq!(define(&mut mros, a, &[OBJECT]).as_slice(), &[a, OBJECT]);
    assert_eq!(define(&mut mros, b, &[a]).as_slice(), &[b, a, OBJECT]);
    assert_eq!(define(&mut mros, c, &[b]).as_slice(), &[c, b, a, OBJECT]);
}

#[test]
fn diamond() {
    let (a, b, c, d) = (
        TypeId::from_raw(100),
        TypeId::from_raw(101),
        TypeId::from_raw(102),
        TypeId::from_raw(103),
    );
    let mut mros = root();
    define(&mut mros, a, &[OBJECT]);
    define(&mut mros, b, &[a]);
    define(&mut mros, c, &[a]);

    assert_eq!(define(&mut mros, d, &[b, c]).as_slice(), &[d, b, c, a, OBJECT]);
}

#[test]
fn nested_diamonds() {
    // F(D, E), D(A, B), E(B, C)
    let [a, b, c, d, e, f] = [100, 101, 102, 103, 104, 105].map(TypeId::from_raw);
    let mut mros = root();
    define(&mut mros, a, &[OBJECT]);
    define(&mut mros, b, &[OBJECT]);
    define(&mut mros, c, &[OBJECT]);
    define(&mut mros, d, &[a, b]);
    define(&mut mros, e, &[b, c]);

    assert_eq!(
        define(&mut mros, f, &[d, e]).as_slice(),
        &[f, d, a, e, b, c, OBJECT]
    );
}

#[test]
fn unknown_base_falls_back_to_object_child() {
    let (a, b) = (TypeId::from_raw(100), TypeId::from_raw(101));
    let mro = linearize(b, &[a], |_| None).unwrap();
    assert_eq!(mro.as_slice(), &[b, a, OBJECT]);
}

#[test]
fn inconsistent_order_is_a_conflict() {
    // C(A, B) where B already derives from A.
    let (a, b, c) = (TypeId::from_raw(100), TypeId::from_raw(101), TypeId::from_raw(102));
    let mut mros = root();
    define(&mut mros, a, &[OBJECT]);
    define(&mut mros, b, &[a]);

    let err = linearize(c, &[a, b], lookup(&mros)).unwrap_err();
    assert!(err.heads.contains(&a));
}

#[test]
fn small_hierarchies_stay_inline() {
    let a = TypeId::from_raw(100);
    let mro = linearize(a, &[OBJECT], |_| None).unwrap();
    assert!(!mro.spilled());
}
