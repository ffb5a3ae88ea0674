//! Property-based tests for matching and pipeline composition.
//!
//! These tests use proptest to generate values and step sequences and verify:
//! 1. Matching is deterministic and leaves patterns and values untouched
//! 2. The first matching clause is the one that runs
//! 3. Composition is associative
//! 4. Extending a pipeline never changes the original

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use fml::prelude::*;
use proptest::prelude::*;

// -- Value Generation Strategies --

/// Generate a leaf value.
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,8}".prop_map(Value::string),
        Just(Value::None),
        Just(Value::Void),
    ]
}

/// Generate a value up to a small depth.
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::tuple),
            inner.clone().prop_map(Value::some),
            inner.clone().prop_map(Value::ok),
            inner.prop_map(Value::err),
        ]
    })
}

/// Generate a pattern drawn from the closed set.
fn pattern_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        leaf_strategy().prop_map(Pattern::lit),
        Just(Pattern::any()),
        Just(Pattern::bind("x")),
        Just(Pattern::ty(TypeDesc::Int)),
        Just(Pattern::ty(TypeDesc::optional(TypeDesc::Str))),
        Just(Pattern::some(Pattern::bind("inner"))),
        Just(Pattern::ok(Pattern::any())),
        Just(Pattern::list_with_rest(
            vec![Pattern::bind("head")],
            Rest::Ignore,
            Vec::new()
        )),
        Just(Pattern::tuple(vec![Pattern::any(), Pattern::any()])),
        Just(Pattern::any().when(|v, _| v.is_truthy())),
    ]
}

// -- Step Generation --

#[derive(Clone, Copy, Debug)]
enum Op {
    Add(i64),
    Mul(i64),
    Neg,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-100i64..100).prop_map(Op::Add),
        (-5i64..5).prop_map(Op::Mul),
        Just(Op::Neg),
    ]
}

fn step(op: Op) -> Expression {
    lift(format!("{op:?}"), move |v| {
        let n = v.as_int().unwrap_or_default();
        Ok(Value::int(match op {
            Op::Add(k) => n.wrapping_add(k),
            Op::Mul(k) => n.wrapping_mul(k),
            Op::Neg => n.wrapping_neg(),
        }))
    })
}

fn pipeline_of(ops: &[Op]) -> Pipeline {
    compose(ops.iter().copied().map(step))
}

fn run(p: &Pipeline, seed: i64) -> Value {
    p.call(&[Value::int(seed)]).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matching_is_deterministic(pattern in pattern_strategy(), value in value_strategy()) {
        let before = value.clone();
        let first = pattern.try_match(&value);
        let second = pattern.try_match(&value);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&value, &before);
    }

    #[test]
    fn first_matching_clause_runs(
        patterns in prop::collection::vec(pattern_strategy(), 1..6),
        value in value_strategy(),
    ) {
        let mut m = matcher();
        for (i, pattern) in patterns.iter().enumerate() {
            m = m.case(pattern.clone(), Value::int(i64::try_from(i).unwrap()));
        }
        let expected = patterns.iter().position(|p| p.matches(&value));
        match (m.apply(&value), expected) {
            (Ok(out), Some(i)) => {
                prop_assert_eq!(out, Value::int(i64::try_from(i).unwrap()));
            }
            (Err(err), None) => {
                prop_assert!(err.is_no_match());
            }
            (got, want) => {
                prop_assert!(false, "got {:?}, expected clause {:?}", got, want);
            }
        }
    }

    #[test]
    fn composition_is_associative(
        a in prop::collection::vec(op_strategy(), 0..4),
        b in prop::collection::vec(op_strategy(), 0..4),
        c in prop::collection::vec(op_strategy(), 0..4),
        seed in -1000i64..1000,
    ) {
        let (pa, pb, pc) = (pipeline_of(&a), pipeline_of(&b), pipeline_of(&c));
        let left = (&pa >> &pb) >> &pc;
        let right = &pa >> (&pb >> &pc);
        prop_assert_eq!(run(&left, seed), run(&right, seed));
        prop_assert_eq!(left.len(), a.len() + b.len() + c.len());
    }

    #[test]
    fn extending_leaves_original_intact(
        base in prop::collection::vec(op_strategy(), 1..5),
        extra in prop::collection::vec(op_strategy(), 1..5),
        seed in -1000i64..1000,
    ) {
        let original = pipeline_of(&base);
        let before = run(&original, seed);
        let extended = &original >> pipeline_of(&extra);
        prop_assert_eq!(original.len(), base.len());
        prop_assert_eq!(extended.len(), base.len() + extra.len());
        prop_assert_eq!(run(&original, seed), before);
    }
}
