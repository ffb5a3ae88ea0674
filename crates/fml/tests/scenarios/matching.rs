//! Match expressions end to end.

use fml::prelude::*;
use fml::{EvalErrorKind, MATCH_ERROR};
use pretty_assertions::assert_eq;

use crate::common::{double, int_of};

#[test]
fn literal_falls_through_to_wildcard() {
    let out = match_value(Value::int(5))
        .case(Value::int(1), Value::string("a"))
        .case(Pattern::any(), Value::string("default"))
        .eval();
    assert_eq!(out.unwrap(), Value::string("default"));
}

#[test]
fn literal_hit_wins_before_wildcard() {
    let out = match_value(Value::int(1))
        .case(Value::int(1), Value::string("a"))
        .case(Pattern::any(), Value::string("default"))
        .eval();
    assert_eq!(out.unwrap(), Value::string("a"));
}

#[test]
fn no_match_names_the_value() {
    let err = match_value(Value::int(7))
        .case(Value::int(1), Value::string("a"))
        .eval()
        .unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(err.kind.category(), MATCH_ERROR);
    assert!(err.message.contains('7'), "{}", err.message);
    assert_eq!(err.value, Some(Value::int(7)));
}

#[test]
fn type_patterns_with_unions() {
    let classify = matcher()
        .case(TypeDesc::optional(TypeDesc::Int), Value::string("maybe int"))
        .case(TypeDesc::Str, Value::string("text"))
        .case(Pattern::any(), Value::string("other"));
    assert_eq!(classify.apply(&Value::int(1)).unwrap(), Value::string("maybe int"));
    assert_eq!(classify.apply(&Value::None).unwrap(), Value::string("maybe int"));
    assert_eq!(classify.apply(&Value::string("s")).unwrap(), Value::string("text"));
    assert_eq!(classify.apply(&Value::Bool(true)).unwrap(), Value::string("other"));
}

#[test]
fn generic_type_pattern_checks_origin_only() {
    let m = matcher()
        .case(TypeDesc::list_of(TypeDesc::Str), Value::string("list"))
        .case(Pattern::any(), Value::string("other"));
    let ints = Value::list(vec![Value::int(1)]);
    assert_eq!(m.apply(&ints).unwrap(), Value::string("list"));
}

#[test]
fn guard_sees_captures() {
    let sign = matcher()
        .case(
            Pattern::bind("n").when(|_, b| b.get("n").is_some_and(|n| int_of(n) < 0)),
            Value::string("negative"),
        )
        .case(Pattern::lit(Value::int(0)), Value::string("zero"))
        .case(Pattern::any(), Value::string("positive"));
    assert_eq!(sign.apply(&Value::int(-3)).unwrap(), Value::string("negative"));
    assert_eq!(sign.apply(&Value::int(0)).unwrap(), Value::string("zero"));
    assert_eq!(sign.apply(&Value::int(9)).unwrap(), Value::string("positive"));
}

#[test]
fn option_destructure_passes_payload_to_handler() {
    let m = matcher()
        .case(Pattern::some(Pattern::bind("x")), FunctionValue::unary("id", |v| Ok(v.clone())))
        .case(Pattern::none(), Value::int(0));
    assert_eq!(m.apply(&Value::some(Value::int(4))).unwrap(), Value::int(4));
    assert_eq!(m.apply(&Value::None).unwrap(), Value::int(0));
}

#[test]
fn list_destructure_with_rest() {
    let m = matcher()
        .case(Pattern::list(Vec::new()), Value::string("empty"))
        .case(
            Pattern::list_with_rest(
                vec![Pattern::bind("first")],
                Rest::Bind("rest".into()),
                Vec::new(),
            ),
            FunctionValue::binary("first_and_len", |first, rest| {
                let len = rest.as_seq().map_or(0, <[Value]>::len);
                Ok(Value::tuple(vec![first.clone(), Value::int(i64::try_from(len).unwrap())]))
            }),
        );
    assert_eq!(m.apply(&Value::list(Vec::new())).unwrap(), Value::string("empty"));
    let out = m
        .apply(&Value::list(vec![Value::int(9), Value::int(8), Value::int(7)]))
        .unwrap();
    assert_eq!(out, Value::tuple(vec![Value::int(9), Value::int(2)]));
}

#[test]
fn match_expression_as_pipeline_step() {
    let describe = matcher()
        .case(Value::int(4), Value::string("four"))
        .case(Pattern::any(), Value::string("something else"));
    let out = val(Value::int(2)) >> double() >> describe >> execute();
    assert_eq!(out.unwrap(), Value::string("four"));
}

#[test]
fn no_match_inside_pipeline_aborts_the_run() {
    let strict = matcher().case(Value::int(1), Value::string("one"));
    let err = (val(Value::int(2)) >> strict >> double() >> execute()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NoMatch { .. }));
}
