//! The pattern set.
//!
//! Patterns form a closed set: literal, type, wildcard, destructure and
//! guard. Each one tests a value and, on success, yields the names it
//! captured. Matching never mutates the pattern or the value, so the same
//! pattern applied to the same value always gives the same answer.
//!
//! Type patterns normalise their descriptor when they are built. A generic
//! descriptor such as `list[str]` is reduced to its origin `list` before any
//! instance check, since the check cannot inspect type parameters.

use std::fmt;
use std::sync::Arc;

use fml_value::{Name, NormalizedType, TypeDesc, Value, OPTION, RESULT};

use crate::bindings::Bindings;

/// Guard predicate over the subject and the inner pattern's captures.
pub type GuardFn = dyn Fn(&Value, &Bindings) -> bool + Send + Sync;

/// A rule that tests a value and optionally captures parts of it.
#[derive(Clone)]
pub enum Pattern {
    /// Structural equality with a value.
    Literal(Value),
    /// Instance of a (possibly compound) type.
    Type {
        ty: TypeDesc,
        accepts: NormalizedType,
        bind: Option<Name>,
    },
    /// Matches anything, optionally capturing it.
    Wildcard(Option<Name>),
    /// Shape check with sub-patterns.
    Destructure(Box<Shape>),
    /// Inner pattern plus a predicate.
    Guard {
        inner: Box<Pattern>,
        predicate: Arc<GuardFn>,
    },
}

/// How a sequence pattern treats elements between its head and tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rest {
    /// No middle: the length must equal head plus tail.
    Exact,
    /// Any number of middle elements, discarded.
    Ignore,
    /// Any number of middle elements, captured as a list.
    Bind(Name),
}

/// Destructure targets.
#[derive(Clone, Debug)]
pub enum Shape {
    /// A list: `[head.., rest, tail..]`.
    Sequence {
        head: Vec<Pattern>,
        rest: Rest,
        tail: Vec<Pattern>,
    },
    /// A tuple of exactly this arity.
    Tuple(Vec<Pattern>),
    /// A record. Closed patterns require the exact field set.
    Record {
        type_name: Option<Name>,
        fields: Vec<(Name, Pattern)>,
        open: bool,
    },
    /// An enum variant. `fields: None` checks the tag only.
    Variant {
        type_name: Option<Name>,
        variant_name: Name,
        fields: Option<Vec<Pattern>>,
    },
}

impl Pattern {
    // Constructors

    /// Literal pattern.
    pub fn lit(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }

    /// Type pattern.
    pub fn ty(ty: TypeDesc) -> Self {
        let accepts = ty.normalize();
        Pattern::Type {
            ty,
            accepts,
            bind: None,
        }
    }

    /// Type pattern capturing the value under `name`.
    pub fn bind_ty(name: impl Into<Name>, ty: TypeDesc) -> Self {
        let accepts = ty.normalize();
        Pattern::Type {
            ty,
            accepts,
            bind: Some(name.into()),
        }
    }

    /// Wildcard that discards the value.
    pub fn any() -> Self {
        Pattern::Wildcard(None)
    }

    /// Wildcard that captures the value.
    pub fn bind(name: impl Into<Name>) -> Self {
        Pattern::Wildcard(Some(name.into()))
    }

    pub fn some(inner: Pattern) -> Self {
        Self::variant(OPTION, "Some", vec![inner])
    }

    pub fn none() -> Self {
        Self::variant(OPTION, "None", Vec::new())
    }

    pub fn ok(inner: Pattern) -> Self {
        Self::variant(RESULT, "Ok", vec![inner])
    }

    pub fn err(inner: Pattern) -> Self {
        Self::variant(RESULT, "Err", vec![inner])
    }

    /// Variant of a named enum with exactly these payload patterns.
    pub fn variant(
        type_name: impl Into<Name>,
        variant_name: impl Into<Name>,
        fields: Vec<Pattern>,
    ) -> Self {
        Pattern::Destructure(Box::new(Shape::Variant {
            type_name: Some(type_name.into()),
            variant_name: variant_name.into(),
            fields: Some(fields),
        }))
    }

    /// Variant tag of a named enum, payload ignored.
    pub fn tag(type_name: impl Into<Name>, variant_name: impl Into<Name>) -> Self {
        Pattern::Destructure(Box::new(Shape::Variant {
            type_name: Some(type_name.into()),
            variant_name: variant_name.into(),
            fields: None,
        }))
    }

    /// Closed record pattern.
    pub fn record<N: Into<Name>>(
        type_name: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Pattern)>,
    ) -> Self {
        Self::record_shape(Some(type_name.into()), fields, false)
    }

    /// Open record pattern; extra fields on the value are allowed.
    pub fn record_open<N: Into<Name>>(
        type_name: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Pattern)>,
    ) -> Self {
        Self::record_shape(Some(type_name.into()), fields, true)
    }

    fn record_shape<N: Into<Name>>(
        type_name: Option<Name>,
        fields: impl IntoIterator<Item = (N, Pattern)>,
        open: bool,
    ) -> Self {
        Pattern::Destructure(Box::new(Shape::Record {
            type_name,
            fields: fields.into_iter().map(|(n, p)| (n.into(), p)).collect(),
            open,
        }))
    }

    /// List of exactly these elements.
    pub fn list(items: Vec<Pattern>) -> Self {
        Self::list_with_rest(items, Rest::Exact, Vec::new())
    }

    /// List with a head, a middle and a tail.
    pub fn list_with_rest(head: Vec<Pattern>, rest: Rest, tail: Vec<Pattern>) -> Self {
        Pattern::Destructure(Box::new(Shape::Sequence { head, rest, tail }))
    }

    pub fn tuple(items: Vec<Pattern>) -> Self {
        Pattern::Destructure(Box::new(Shape::Tuple(items)))
    }

    /// Add a guard to this pattern.
    #[must_use]
    pub fn when(
        self,
        predicate: impl Fn(&Value, &Bindings) -> bool + Send + Sync + 'static,
    ) -> Self {
        Pattern::Guard {
            inner: Box::new(self),
            predicate: Arc::new(predicate),
        }
    }

    // Matching

    /// Test `value`; on success return the captures.
    pub fn try_match(&self, value: &Value) -> Option<Bindings> {
        let mut bindings = Bindings::new();
        self.match_into(value, &mut bindings).then_some(bindings)
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.try_match(value).is_some()
    }

    fn match_into(&self, value: &Value, out: &mut Bindings) -> bool {
        match self {
            Pattern::Literal(lit) => lit == value,
            Pattern::Type { accepts, bind, .. } => {
                if !accepts.admits(value) {
                    return false;
                }
                if let Some(name) = bind {
                    out.push(Name::clone(name), value.clone());
                }
                true
            }
            Pattern::Wildcard(bind) => {
                if let Some(name) = bind {
                    out.push(Name::clone(name), value.clone());
                }
                true
            }
            Pattern::Destructure(shape) => shape.match_into(value, out),
            Pattern::Guard { inner, predicate } => {
                let mut local = Bindings::new();
                if !inner.match_into(value, &mut local) || !predicate(value, &local) {
                    return false;
                }
                out.extend(local);
                true
            }
        }
    }
}

fn match_all(patterns: &[Pattern], values: &[Value], out: &mut Bindings) -> bool {
    patterns.len() == values.len()
        && patterns
            .iter()
            .zip(values)
            .all(|(pattern, value)| pattern.match_into(value, out))
}

impl Shape {
    fn match_into(&self, value: &Value, out: &mut Bindings) -> bool {
        match self {
            Shape::Sequence { head, rest, tail } => {
                let Value::List(items) = value else {
                    return false;
                };
                let fixed = head.len() + tail.len();
                let fits = match rest {
                    Rest::Exact => items.len() == fixed,
                    Rest::Ignore | Rest::Bind(_) => items.len() >= fixed,
                };
                if !fits {
                    return false;
                }
                let (front, after) = items.split_at(head.len());
                let (middle, back) = after.split_at(after.len() - tail.len());
                if !match_all(head, front, out) {
                    return false;
                }
                if let Rest::Bind(name) = rest {
                    out.push(Name::clone(name), Value::list(middle.to_vec()));
                }
                match_all(tail, back, out)
            }
            Shape::Tuple(patterns) => match value {
                Value::Tuple(items) => match_all(patterns, items, out),
                _ => false,
            },
            Shape::Record {
                type_name,
                fields,
                open,
            } => {
                let Value::Record(record) = value else {
                    return false;
                };
                if type_name.as_ref().is_some_and(|t| *t != record.type_name) {
                    return false;
                }
                if !open
                    && (record.len() != fields.len()
                        || !record
                            .field_names()
                            .iter()
                            .all(|name| fields.iter().any(|(f, _)| f == name)))
                {
                    return false;
                }
                fields.iter().all(|(name, pattern)| {
                    record
                        .get(name)
                        .is_some_and(|field| pattern.match_into(field, out))
                })
            }
            Shape::Variant {
                type_name,
                variant_name,
                fields,
            } => {
                let Some((ty, variant, payload)) = value.variant_parts() else {
                    return false;
                };
                if type_name.as_ref().is_some_and(|t| &**t != ty) || &**variant_name != variant {
                    return false;
                }
                match fields {
                    None => true,
                    Some(patterns) => match_all(patterns, payload, out),
                }
            }
        }
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::Literal(value)
    }
}

impl From<TypeDesc> for Pattern {
    fn from(ty: TypeDesc) -> Self {
        Pattern::ty(ty)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(v) => write!(f, "{v}"),
            Pattern::Type { ty, bind, .. } => match bind {
                Some(name) => write!(f, "{name}: {ty}"),
                None => write!(f, "{ty}"),
            },
            Pattern::Wildcard(None) => write!(f, "_"),
            Pattern::Wildcard(Some(name)) => write!(f, "{name}"),
            Pattern::Destructure(shape) => write!(f, "{shape:?}"),
            Pattern::Guard { inner, .. } => write!(f, "{inner:?} if <guard>"),
        }
    }
}
