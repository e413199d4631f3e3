// Copyright 2025 Cowboy AI, LLC.

mod common;

use cim_category::{
    Category, CategoryContext, CategoryError, CategoryKind, Combinator, CompositeCategory,
};
use common::*;
use serde_json::json;
use test_case::test_case;

#[derive(Debug, PartialEq)]
enum Outcome {
    Left,
    Right,
    Composite,
    FreshNull,
}

/// Which node a composite answers with for each operand outcome
///
/// ```mermaid
/// graph TD
///     A[operand a] --> C{combinator}
///     B[operand b] --> C
///     C -->|a is Null| D[a / b]
///     C -->|both matched| E[self / fresh Null]
/// ```
#[test_case(Combinator::And, true, true => Outcome::Composite; "and both match")]
#[test_case(Combinator::And, true, false => Outcome::Right; "and right null")]
#[test_case(Combinator::And, false, true => Outcome::Left; "and left null")]
#[test_case(Combinator::And, false, false => Outcome::Left; "and both null")]
#[test_case(Combinator::Or, true, true => Outcome::Composite; "or both match")]
#[test_case(Combinator::Or, true, false => Outcome::Left; "or right null")]
#[test_case(Combinator::Or, false, true => Outcome::Right; "or left null")]
#[test_case(Combinator::Or, false, false => Outcome::Right; "or both null")]
#[test_case(Combinator::XOr, true, true => Outcome::FreshNull; "xor both match")]
#[test_case(Combinator::XOr, true, false => Outcome::Left; "xor right null")]
#[test_case(Combinator::XOr, false, true => Outcome::Right; "xor left null")]
#[test_case(Combinator::XOr, false, false => Outcome::Right; "xor both null")]
fn combination_table(combinator: Combinator, a_matches: bool, b_matches: bool) -> Outcome {
    // a Null operand categorizes to itself, so every outcome is traceable
    let operand = |matches: bool| if matches { always() } else { Category::null() };
    let a = operand(a_matches);
    let b = operand(b_matches);
    let composite: Category<Atom> = CompositeCategory::new(combinator, a.clone(), b.clone()).into();

    let atom = chain(&[1])[0];
    let result = composite.categorize(&atom, &CategoryContext::new()).unwrap();

    if result.same_instance(&composite) {
        Outcome::Composite
    } else if result.same_instance(&a) {
        Outcome::Left
    } else if result.same_instance(&b) {
        Outcome::Right
    } else {
        assert!(result.is_null());
        Outcome::FreshNull
    }
}

#[test]
fn absorption_when_only_one_side_matches() {
    let atoms = chain(&[6, 1]);
    let context = CategoryContext::new();
    let carbon = z(6);
    let hydrogen = z(1);
    let atom = &atoms[0];

    let and = &carbon & &hydrogen;
    assert!(and.categorize(atom, &context).unwrap().is_null());

    let or: Category<Atom> = CompositeCategory::or(carbon.clone(), hydrogen.clone()).into();
    assert!(or.categorize(atom, &context).unwrap().same_instance(&carbon));

    let xor = &carbon ^ &hydrogen;
    assert!(xor.categorize(atom, &context).unwrap().same_instance(&carbon));
}

#[test]
fn double_match() {
    let atoms = chain(&[8, 6]);
    let context = CategoryContext::new();
    let oxygen = z(8);
    let first = even();

    let and = oxygen.combine_and(&first);
    assert!(and.categorize(&atoms[0], &context).unwrap().same_instance(&and));

    let or: Category<Atom> = CompositeCategory::or(oxygen.clone(), first.clone()).into();
    assert!(or.categorize(&atoms[0], &context).unwrap().same_instance(&or));

    let xor = oxygen.combine_xor(&first);
    let result = xor.categorize(&atoms[0], &context).unwrap();
    assert!(result.is_null());
    assert!(!result.same_instance(&xor));
}

#[test]
fn null_is_a_fixed_point() {
    let null = Category::<Atom>::null();
    let context = CategoryContext::new();
    for atom in chain(&[1, 2, 3]) {
        let result = null.categorize(&atom, &context).unwrap();
        assert!(result.is_null());
        assert!(result.same_instance(&null));
    }
}

#[test]
fn vectorized_matches_scalar() {
    let atoms = chain(&[6, 1, 6, 8, 1, 6, 7]);
    let context = CategoryContext::new();
    let expression = (z(6) & odd()) ^ z(1);

    let all = expression.categorize_all(&atoms, &context).unwrap();
    assert_eq!(all.len(), atoms.len());
    for (atom, result) in atoms.iter().zip(&all) {
        let single = expression.categorize(atom, &context).unwrap();
        assert_eq!(result.kind(), single.kind());
        assert!(*result == single);
    }

    let matched: Vec<bool> = all.iter().map(Category::is_match).collect();
    assert_eq!(matched, vec![false, true, false, false, true, true, false]);
}

#[test]
fn composite_reports_which_leaf_matched() {
    let atoms = chain(&[6, 8, 7]);
    let carbon = z(6);
    let oxygen = z(8);
    let either: Category<Atom> = CompositeCategory::or(carbon.clone(), oxygen.clone()).into();

    let names: Vec<String> = either
        .categorize_all(&atoms, &CategoryContext::new())
        .unwrap()
        .iter()
        .map(Category::name)
        .collect();
    assert_eq!(names, vec!["Z=6", "Z=8", "∅"]);
}

#[test]
fn composite_names() {
    assert_eq!((z(6) & odd()).name(), "Z=6 & odd");
    assert_eq!(((z(6) & odd()) ^ even()).name(), "(Z=6 & odd) ⊕ even");

    let or: Category<Atom> = CompositeCategory::or(z(1), z(8) ^ odd()).into();
    assert_eq!(or.name(), "Z=1 | (Z=8 ⊕ odd)");
    assert_eq!(or.to_string(), "Z=1 | (Z=8 ⊕ odd)");

    let both: Category<Atom> = CompositeCategory::or(z(1) & even(), z(8) ^ odd()).into();
    assert_eq!(both.name(), "(Z=1 & even) | (Z=8 ⊕ odd)");
}

#[test]
fn explicit_composite_name_wins() {
    let hydroxyl = z(8) & z(1);
    hydroxyl.set_name("OH");
    assert_eq!(hydroxyl.name(), "OH");
    assert_eq!((hydroxyl ^ odd()).name(), "(OH) ⊕ odd");
}

#[test]
fn composite_name_is_kept_once_read() {
    let carbon = z(6);
    let composite = &carbon & &odd();

    assert_eq!(composite.name(), "Z=6 & odd");
    carbon.set_name("carbon");
    assert_eq!(composite.name(), "Z=6 & odd");

    let unread = &carbon & &even();
    assert_eq!(unread.name(), "carbon & even");
}

#[test]
fn shared_operands_are_not_mutated() {
    let carbon = z(6);
    let left = &carbon & &odd();
    let right = &carbon ^ &even();
    let atoms = chain(&[6, 6, 1]);
    let context = CategoryContext::new();

    left.categorize_all(&atoms, &context).unwrap();
    right.categorize_all(&atoms, &context).unwrap();

    assert_eq!(carbon.name(), "Z=6");
    assert_eq!(carbon.kind(), CategoryKind::Leaf);
    assert!(left.as_composite().unwrap().a().same_instance(&carbon));
    assert!(right.as_composite().unwrap().a().same_instance(&carbon));
}

#[test]
fn context_reaches_nested_leaves() {
    let atoms = chain(&[6, 7, 6]);
    let expression = Category::leaf(ContextZ) & even();

    let context = CategoryContext::new().with_parameter("z", json!(6));
    let matched: Vec<bool> = expression
        .categorize_all(&atoms, &context)
        .unwrap()
        .iter()
        .map(Category::is_match)
        .collect();
    assert_eq!(matched, vec![true, false, true]);

    let err = expression
        .categorize(&atoms[0], &CategoryContext::new())
        .unwrap_err();
    assert!(matches!(err, CategoryError::MissingParameter(ref key) if key == "z"));
}

#[test]
fn both_operands_are_always_evaluated() {
    let atoms = chain(&[1, 1, 1]);
    // the left side already decides AND, yet the right side still runs and fails
    let expression = Category::null() & Category::leaf(Bounded(2));

    assert!(expression
        .categorize(&atoms[1], &CategoryContext::new())
        .unwrap()
        .is_null());

    let err = expression
        .categorize_all(&atoms, &CategoryContext::new())
        .unwrap_err();
    assert!(err.is_evaluation_error());
    assert_eq!(
        err.to_string(),
        "Predicate evaluation failed: Bounded - atom 2 out of range"
    );
}

#[test]
fn operands_are_exposed_for_inspection() {
    let carbon = z(6);
    let first = even();
    let composite = carbon.combine_xor(&first);
    let inner = composite.as_composite().unwrap();

    assert_eq!(inner.combinator(), Combinator::XOr);
    assert!(inner.a().same_instance(&carbon));
    assert!(inner.b().same_instance(&first));

    let atom = chain(&[6])[0];
    let (a, b) = inner
        .categorize_operands(&atom, &CategoryContext::new())
        .unwrap();
    assert!(a.same_instance(&carbon));
    assert!(b.same_instance(&first));
}
