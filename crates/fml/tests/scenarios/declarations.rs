//! Enum and record declarations used with matching and pipelines.

use fml::prelude::*;
use fml::{Assignment, EvalErrorKind};
use pretty_assertions::assert_eq;

use crate::common::int_of;

fn shape() -> EnumDef {
    EnumDef::new("Shape")
        .tuple("Circle", [TypeDesc::Int])
        .tuple("Rect", [TypeDesc::Int, TypeDesc::Int])
        .unit("Empty")
}

fn point() -> RecordDef {
    RecordDef::new("Point")
        .field("x", TypeDesc::Int)
        .field("y", TypeDesc::Int)
        .field_with_default("label", TypeDesc::Str, Value::string("origin"))
}

fn area() -> Expression {
    matcher()
        .case(
            Pattern::variant("Shape", "Circle", vec![Pattern::bind("r")]),
            FunctionValue::unary("circle_area", |r| Ok(Value::int(3 * int_of(r) * int_of(r)))),
        )
        .case(
            Pattern::variant("Shape", "Rect", vec![Pattern::bind("w"), Pattern::bind("h")]),
            FunctionValue::binary("rect_area", |w, h| Ok(Value::int(int_of(w) * int_of(h)))),
        )
        .case(Pattern::tag("Shape", "Empty"), Value::int(0))
        .into()
}

#[test]
fn enum_variants_drive_a_match() {
    let shapes = shape();
    let circle = shapes.construct("Circle", vec![Value::int(2)]).unwrap();
    let rect = shapes.construct("Rect", vec![Value::int(3), Value::int(4)]).unwrap();
    let empty = shapes.value("Empty").unwrap();
    let area = area();
    assert_eq!(area.apply(&circle).unwrap(), Value::int(12));
    assert_eq!(area.apply(&rect).unwrap(), Value::int(12));
    assert_eq!(area.apply(&empty).unwrap(), Value::int(0));
}

#[test]
fn enum_rejects_unknown_variant_and_bad_payload() {
    let shapes = shape();
    let unknown = shapes.construct("Triangle", Vec::new()).unwrap_err();
    assert!(matches!(unknown.kind, EvalErrorKind::UnknownVariant { .. }));
    let bad = shapes
        .construct("Circle", vec![Value::string("big")])
        .unwrap_err();
    assert!(matches!(bad.kind, EvalErrorKind::InvalidShape { .. }));
}

#[test]
fn mapping_areas_over_a_list_of_shapes() {
    let shapes = shape();
    let list = Value::list(vec![
        shapes.construct("Circle", vec![Value::int(1)]).unwrap(),
        shapes.construct("Rect", vec![Value::int(2), Value::int(5)]).unwrap(),
        shapes.value("Empty").unwrap(),
    ]);
    let out = val(list) >> imap(area()) >> execute();
    assert_eq!(
        out.unwrap(),
        Value::list(vec![Value::int(3), Value::int(10), Value::int(0)])
    );
}

#[test]
fn record_defaults_and_field_patterns() {
    let p = point()
        .construct([("x", Value::int(0)), ("y", Value::int(5))])
        .unwrap();
    let record = p.as_record().unwrap();
    assert_eq!(record.get("label"), Some(&Value::string("origin")));

    let on_axis = matcher()
        .case(
            Pattern::record_open("Point", [("x", Pattern::lit(Value::int(0)))]),
            Value::string("on y axis"),
        )
        .case(Pattern::any(), Value::string("elsewhere"));
    assert_eq!(on_axis.apply(&p).unwrap(), Value::string("on y axis"));
}

#[test]
fn closed_record_pattern_needs_every_field() {
    let p = point()
        .construct([("x", Value::int(1)), ("y", Value::int(2))])
        .unwrap();
    let closed = Pattern::record("Point", [("x", Pattern::any()), ("y", Pattern::any())]);
    assert!(!closed.matches(&p));
    let full = Pattern::record(
        "Point",
        [
            ("x", Pattern::any()),
            ("y", Pattern::any()),
            ("label", Pattern::any()),
        ],
    );
    assert!(full.matches(&p));
}

#[test]
fn record_update_leaves_original() {
    let p = point()
        .construct([("x", Value::int(1)), ("y", Value::int(2))])
        .unwrap();
    let record = p.as_record().unwrap();
    let moved = record.with_field("x", Value::int(10)).unwrap();
    assert_eq!(moved.get("x"), Some(&Value::int(10)));
    assert_eq!(record.get("x"), Some(&Value::int(1)));
}

#[test]
fn record_missing_field_fails() {
    let err = point().construct([("x", Value::int(1))]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::MissingField {
            type_name: "Point".into(),
            field: "y".into(),
        }
    );
}

#[test]
fn typed_assignment_checks_value() {
    let slot = Assignment::new("count", TypeDesc::Int);
    let bound = slot.assign(Value::int(3)).unwrap();
    assert_eq!(bound.value(), Value::int(3));
    assert_eq!(slot.value(), Value::Void);
    let err = slot.assign(Value::string("three")).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}
