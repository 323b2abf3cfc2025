use super::*;
use pretty_assertions::assert_eq;

#[test]
fn every_operator_on_equal_operands() {
    let expected = [false, true, false, true, true, false];
    for (op, want) in CompareOp::ALL.into_iter().zip(expected) {
        let pred = Predicate::new(op, 0);
        assert_eq!(pred.eval(&Value::int(0)), want, "0 {op} 0");
    }
}

#[test]
fn ordering_against_operand() {
    let gt_zero = Predicate::new(CompareOp::Gt, 0);
    assert!(gt_zero.eval(&Value::int(1)));
    assert!(gt_zero.eval(&Value::float(0.5)));
    assert!(!gt_zero.eval(&Value::int(-1)));

    let le_two = Predicate::new(CompareOp::Le, 2.0);
    assert!(le_two.eval(&Value::int(2)));
    assert!(!le_two.eval(&Value::int(3)));
}

#[test]
fn unsupported_ordering_is_not_applicable() {
    for op in [CompareOp::Lt, CompareOp::Le, CompareOp::Gt, CompareOp::Ge] {
        let pred = Predicate::new(op, 0);
        assert!(!pred.eval(&Value::string("zero")), "\"zero\" {op} 0");
        assert!(!pred.eval(&Value::None), "None {op} 0");
    }
}

#[test]
fn equality_across_kinds_never_fails() {
    let eq = Predicate::new(CompareOp::Eq, "value");
    let ne = Predicate::new(CompareOp::Ne, "value");
    assert!(eq.eval(&Value::string("value")));
    assert!(!eq.eval(&Value::int(1)));
    assert!(ne.eval(&Value::int(1)));
    assert!(!ne.eval(&Value::string("value")));
}

#[test]
fn display() {
    assert_eq!(Predicate::new(CompareOp::Ge, 7).to_string(), ">= 7");
    assert_eq!(CompareOp::Ne.to_string(), "!=");
}
