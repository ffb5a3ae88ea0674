//! Composite value types: records and functions.
//!
//! These types have their own internal structure and identity rules, so they
//! live apart from the primitive variants of `Value`.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use super::{Heap, Name, Value};
use crate::errors::{unknown_field, wrong_arg_count, wrong_function_args, EvalError, EvalResult};

// RecordLayout

/// Field order plus O(1) lookup by field name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    names: Vec<Name>,
    field_indices: FxHashMap<Name, usize>,
}

impl RecordLayout {
    /// Build a layout; a repeated name keeps its first position.
    pub fn new(field_names: impl IntoIterator<Item = Name>) -> Self {
        let mut names = Vec::new();
        let mut field_indices = FxHashMap::default();
        for name in field_names {
            if !field_indices.contains_key(&name) {
                field_indices.insert(Name::clone(&name), names.len());
                names.push(name);
            }
        }
        RecordLayout {
            names,
            field_indices,
        }
    }

    /// Get the index of a field by name.
    pub fn get_index(&self, field: &str) -> Option<usize> {
        self.field_indices.get(field).copied()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// RecordValue

/// Immutable record instance.
///
/// Equality is structural: same type name, same field set, equal values.
/// Field order does not affect equality.
#[derive(Clone)]
pub struct RecordValue {
    pub type_name: Name,
    layout: Arc<RecordLayout>,
    values: Heap<Vec<Value>>,
}

impl RecordValue {
    /// Create a record; a field given twice keeps the last value.
    pub fn new<N: Into<Name>>(
        type_name: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Value)>,
    ) -> Self {
        let (names, given): (Vec<Name>, Vec<Value>) =
            fields.into_iter().map(|(n, v)| (n.into(), v)).unzip();
        let layout = RecordLayout::new(names.iter().cloned());
        let mut values = vec![Value::Void; layout.len()];
        for (name, value) in names.iter().zip(given) {
            if let Some(idx) = layout.get_index(name) {
                values[idx] = value;
            }
        }
        RecordValue {
            type_name: type_name.into(),
            layout: Arc::new(layout),
            values: Heap::new(values),
        }
    }

    /// Get a field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let index = self.layout.get_index(field)?;
        self.values.get(index)
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    pub fn field_names(&self) -> &[Name] {
        self.layout.names()
    }

    /// `(name, value)` pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.layout.names().iter().zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Copy of this record with one field replaced.
    ///
    /// The layout is shared with the original; only the values are copied.
    pub fn with_field(&self, field: &str, value: Value) -> Result<Self, EvalError> {
        let index = self
            .layout
            .get_index(field)
            .ok_or_else(|| unknown_field(&self.type_name, field))?;
        let mut values = self.values.to_vec();
        values[index] = value;
        Ok(RecordValue {
            type_name: Name::clone(&self.type_name),
            layout: Arc::clone(&self.layout),
            values: Heap::new(values),
        })
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.len() == other.len()
            && self
                .fields()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

// FunctionValue

/// Signature of a native function body.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult + Send + Sync;

/// Callable value with partial application.
///
/// A function has a fixed arity and the arguments bound so far. Calling it
/// with fewer arguments than it still needs returns a new function holding
/// the extra arguments; reaching the arity runs the body with every bound
/// argument in supply order. Arity zero ignores its arguments.
///
/// Two function values are equal when they share the same body, arity and
/// bound arguments.
#[derive(Clone)]
pub struct FunctionValue {
    name: Name,
    arity: usize,
    func: Arc<NativeFn>,
    bound: Heap<Vec<Value>>,
}

impl FunctionValue {
    /// Wrap a body taking its arguments as a slice.
    pub fn new(
        name: impl Into<Name>,
        arity: usize,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        FunctionValue {
            name: name.into(),
            arity,
            func: Arc::new(func),
            bound: Heap::new(Vec::new()),
        }
    }

    pub fn nullary(
        name: impl Into<Name>,
        func: impl Fn() -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, 0, move |_| func())
    }

    pub fn unary(
        name: impl Into<Name>,
        func: impl Fn(&Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, 1, move |args| match args {
            [a] => func(a),
            _ => Err(wrong_function_args(1, args.len())),
        })
    }

    pub fn binary(
        name: impl Into<Name>,
        func: impl Fn(&Value, &Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, 2, move |args| match args {
            [a, b] => func(a, b),
            _ => Err(wrong_function_args(2, args.len())),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Arguments captured by earlier partial calls.
    pub fn bound(&self) -> &[Value] {
        &self.bound
    }

    /// Arguments still needed before the body runs.
    pub fn remaining(&self) -> usize {
        self.arity.saturating_sub(self.bound.len())
    }

    /// Same body and bound arguments under a different arity.
    #[must_use]
    pub fn with_arity(&self, arity: usize) -> Self {
        FunctionValue {
            name: Name::clone(&self.name),
            arity,
            func: Arc::clone(&self.func),
            bound: self.bound.clone(),
        }
    }

    /// Apply arguments, returning either the body's result or a new
    /// partially applied function.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        if self.arity == 0 {
            return (self.func)(&[]);
        }

        let total = self.bound.len() + args.len();
        if total > self.arity {
            return Err(wrong_arg_count(&self.name, self.arity, total));
        }

        if self.bound.is_empty() && total == self.arity {
            return (self.func)(args);
        }

        let mut all = Vec::with_capacity(total);
        all.extend_from_slice(&self.bound);
        all.extend_from_slice(args);

        if total == self.arity {
            tracing::trace!(function = %self.name, arity = self.arity, "saturated");
            (self.func)(&all)
        } else {
            Ok(Value::Function(FunctionValue {
                name: Name::clone(&self.name),
                arity: self.arity,
                func: Arc::clone(&self.func),
                bound: Heap::new(all),
            }))
        }
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
            && self.arity == other.arity
            && self.bound == other.bound
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}/{}", self.name, self.arity)?;
        if !self.bound.is_empty() {
            write!(f, " bound {}", self.bound.len())?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests;
