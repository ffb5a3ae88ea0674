//! Runtime values that patterns and pipelines operate on.
//!
//! # Allocation
//!
//! Every heap payload goes through a factory method on `Value`. The `Heap<T>`
//! wrapper has a private constructor, so outside this module:
//!
//! ```text
//! let s = Value::string("hello");        // OK
//! let opt = Value::some(Value::int(42)); // OK
//! let s = Value::Str(Heap::new(...));    // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Discriminants
//!
//! User enum variants and the built-in `Option`/`Result` families expose the
//! same `(type, variant, payload)` triple through [`Value::variant_parts`],
//! which is what type and destructure patterns inspect.
//!
//! # Thread Safety
//!
//! Payloads are shared through `Arc` and never mutated, so values are
//! `Send + Sync` and cheap to clone.

mod composite;
mod error_value;
mod heap;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use composite::{FunctionValue, NativeFn, RecordLayout, RecordValue};
pub use error_value::ErrorValue;
pub use heap::Heap;

use crate::errors::{not_callable, type_mismatch, EvalResult};

/// Interned-style name for types, variants, fields and bindings.
pub type Name = Arc<str>;

/// Type name of the built-in optional family.
pub const OPTION: &str = "Option";
/// Type name of the built-in fallible family.
pub const RESULT: &str = "Result";

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Primitives
    Int(i64),
    Float(f64),
    Bool(bool),
    /// The absence of a value (what a side-effecting step returns).
    Void,

    // Heap types
    Str(Heap<String>),
    /// Immutable ordered sequence.
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    Map(Heap<BTreeMap<String, Value>>),

    // Built-in algebraic families
    Some(Heap<Value>),
    None,
    Ok(Heap<Value>),
    Err(Heap<Value>),

    /// User enum variant with its positional payload.
    Variant {
        type_name: Name,
        variant_name: Name,
        fields: Heap<Vec<Value>>,
    },
    Record(RecordValue),
    Function(FunctionValue),
    /// Exception-like value carried inside `Err` or raised by a step.
    Error(Heap<ErrorValue>),
}

impl Value {
    // Factory methods

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    ///
    /// ```text
    /// let nums = Value::list(vec![Value::int(1), Value::int(2)]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn some(v: Value) -> Self {
        Value::Some(Heap::new(v))
    }

    #[inline]
    pub fn ok(v: Value) -> Self {
        Value::Ok(Heap::new(v))
    }

    #[inline]
    pub fn err(v: Value) -> Self {
        Value::Err(Heap::new(v))
    }

    /// Create an enum variant value.
    pub fn variant(
        type_name: impl Into<Name>,
        variant_name: impl Into<Name>,
        fields: Vec<Value>,
    ) -> Self {
        Value::Variant {
            type_name: type_name.into(),
            variant_name: variant_name.into(),
            fields: Heap::new(fields),
        }
    }

    /// Create a fieldless enum variant value.
    pub fn unit_variant(type_name: impl Into<Name>, variant_name: impl Into<Name>) -> Self {
        Self::variant(type_name, variant_name, Vec::new())
    }

    /// Create a record value; fields keep their given order.
    pub fn record<N: Into<Name>>(
        type_name: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Value)>,
    ) -> Self {
        Value::Record(RecordValue::new(type_name, fields))
    }

    #[inline]
    pub fn function(f: FunctionValue) -> Self {
        Value::Function(f)
    }

    /// Create an error value of the given kind.
    pub fn error(kind: impl Into<Name>, message: impl Into<String>) -> Self {
        Value::Error(Heap::new(ErrorValue::new(kind, message)))
    }

    #[inline]
    pub fn from_error(error: ErrorValue) -> Self {
        Value::Error(Heap::new(error))
    }

    // Inspection

    /// Name of the value's runtime type.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Void => "void",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Some(_) | Value::None => OPTION,
            Value::Ok(_) | Value::Err(_) => RESULT,
            Value::Variant { type_name, .. } => type_name.as_ref(),
            Value::Record(r) => r.type_name.as_ref(),
            Value::Function(_) => "function",
            Value::Error(e) => e.kind(),
        }
    }

    /// Type name with the variant tag, e.g. `Option.Some` or `int`.
    pub fn type_label(&self) -> String {
        match self.variant_parts() {
            Some((ty, variant, _)) => format!("{ty}.{variant}"),
            None => self.type_name().to_string(),
        }
    }

    /// `(type, variant, payload)` for enum-like values.
    ///
    /// `Some`/`None` report as `Option`, `Ok`/`Err` as `Result`. Everything
    /// that is not a variant returns `None`.
    pub fn variant_parts(&self) -> Option<(&str, &str, &[Value])> {
        match self {
            Value::Some(v) => Some((OPTION, "Some", std::slice::from_ref(&**v))),
            Value::None => Some((OPTION, "None", &[])),
            Value::Ok(v) => Some((RESULT, "Ok", std::slice::from_ref(&**v))),
            Value::Err(v) => Some((RESULT, "Err", std::slice::from_ref(&**v))),
            Value::Variant {
                type_name,
                variant_name,
                fields,
            } => Some((&**type_name, &**variant_name, fields.as_slice())),
            _ => None,
        }
    }

    /// Truthiness used by filters and guards.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Void | Value::None => false,
            _ => true,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    // Sequence operations

    /// First element of a list.
    pub fn head(&self) -> Option<&Value> {
        self.as_seq()?.first()
    }

    /// Everything after the first element, as a new list.
    pub fn tail(&self) -> Option<Value> {
        let items = self.as_seq()?;
        Some(Value::list(items.get(1..).unwrap_or_default().to_vec()))
    }

    /// Number of elements of a list or tuple.
    pub fn len(&self) -> Option<usize> {
        self.as_seq().map(<[Value]>::len)
    }

    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_seq()?.get(index)
    }

    /// Append another sequence, producing a new list.
    pub fn concat(&self, other: &Value) -> EvalResult {
        let left = self
            .as_seq()
            .ok_or_else(|| type_mismatch("list", self.type_name()))?;
        let right = other
            .as_seq()
            .ok_or_else(|| type_mismatch("list", other.type_name()))?;
        let mut items = Vec::with_capacity(left.len() + right.len());
        items.extend_from_slice(left);
        items.extend_from_slice(right);
        Ok(Value::list(items))
    }

    /// Call this value as a function.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        match self {
            Value::Function(f) => f.call(args),
            other => Err(not_callable(other.type_name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Void, Value::Void) | (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Some(a), Value::Some(b))
            | (Value::Ok(a), Value::Ok(b))
            | (Value::Err(a), Value::Err(b)) => a == b,
            (
                Value::Variant {
                    type_name: t1,
                    variant_name: v1,
                    fields: f1,
                },
                Value::Variant {
                    type_name: t2,
                    variant_name: v2,
                    fields: f2,
                },
            ) => t1 == t2 && v1 == v2 && f1 == f2,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Void => write!(f, "void"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Some(v) => write!(f, "Some({v})"),
            Value::None => write!(f, "None"),
            Value::Ok(v) => write!(f, "Ok({v})"),
            Value::Err(v) => write!(f, "Err({v})"),
            Value::Variant {
                type_name,
                variant_name,
                fields,
            } => {
                write!(f, "{type_name}.{variant_name}")?;
                if !fields.is_empty() {
                    write!(f, "(")?;
                    write_items(f, fields)?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            Value::Record(r) => write!(f, "{r}"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Error(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<FunctionValue> for Value {
    fn from(f: FunctionValue) -> Self {
        Value::Function(f)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::from_error(e)
    }
}
